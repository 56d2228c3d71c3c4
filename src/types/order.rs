/// Side of a resting order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrderSide {
    Ask,
    Bid,
}

impl OrderSide {
    /// Whether orders on this side buy the base asset.
    pub fn is_buy(&self) -> bool {
        matches!(self, OrderSide::Bid)
    }
}

impl From<bool> for OrderSide {
    fn from(is_buy: bool) -> Self {
        if is_buy { OrderSide::Bid } else { OrderSide::Ask }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderSide::Ask => write!(f, "ask"),
            OrderSide::Bid => write!(f, "bid"),
        }
    }
}
