mod market;
mod order;
mod request;

pub use market::MarketParams;
pub use order::OrderSide;
pub use request::BatchOrders;

use alloy::primitives::U256;

use crate::error::{LpError, LpResult};

/// Denominator of fee rates expressed in basis points.
pub const FEE_DENOMINATOR: u64 = 10_000;

/// Single resting order of a liquidity ladder.
#[derive(Clone, Copy, PartialEq, Eq, derive_more::Debug)]
pub struct Position {
    #[debug("{price}")]
    pub(crate) price: U256,
    #[debug("{flip_price}")]
    pub(crate) flip_price: U256,
    #[debug("{liquidity}")]
    pub(crate) liquidity: U256,
}

impl Position {
    pub fn new(price: U256, flip_price: U256, liquidity: U256) -> Self {
        Self {
            price,
            flip_price,
            liquidity,
        }
    }

    /// Price scaled by the market price precision.
    pub fn price(&self) -> U256 {
        self.price
    }

    /// Price the filled inventory gets re-quoted at on the opposite side.
    pub fn flip_price(&self) -> U256 {
        self.flip_price
    }

    /// Order size scaled by the market size precision.
    pub fn liquidity(&self) -> U256 {
        self.liquidity
    }

    pub(crate) fn with_liquidity(self, liquidity: U256) -> Self {
        Self { liquidity, ..self }
    }
}

/// Price range the ladder is generated over, together with the book
/// snapshot it is anchored to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceRange {
    start_price: U256,
    end_price: U256,
    best_ask_price: U256,
    max_price_points: Option<u32>,
}

impl PriceRange {
    pub fn new(
        start_price: U256,
        end_price: U256,
        best_ask_price: U256,
        max_price_points: Option<u32>,
    ) -> LpResult<Self> {
        if start_price.is_zero() || best_ask_price.is_zero() {
            return Err(LpError::InvalidParameter("prices must be non-zero"));
        }
        if start_price >= end_price {
            return Err(LpError::InvalidParameter(
                "start price must be below end price",
            ));
        }
        Ok(Self {
            start_price,
            end_price,
            best_ask_price,
            max_price_points,
        })
    }

    pub fn start_price(&self) -> U256 {
        self.start_price
    }

    pub fn end_price(&self) -> U256 {
        self.end_price
    }

    pub fn best_ask_price(&self) -> U256 {
        self.best_ask_price
    }

    /// Upper bound on the number of generated price levels, if any.
    pub fn max_price_points(&self) -> Option<u32> {
        self.max_price_points
    }
}

/// Distribution of liquidity across the levels of one side.
///
/// * [`Shape::Flat`] puts the same quote value on every level.
/// * [`Shape::Curve`] grows linearly from the outer edge of the range
///   towards the spread.
/// * [`Shape::BidAsk`] grows linearly from the spread towards the outer
///   edge of the range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Shape {
    #[default]
    Flat,
    Curve,
    BidAsk,
}

/// Liquidity budget of the batch, determining how totals are solved for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Liquidity {
    /// Quote asset total; the base total is derived from the ask side.
    Quote(U256),
    /// Base asset total provisioned on asks; the bid side mirrors the
    /// quote value the asks imply.
    Base(U256),
    /// Both totals, each spread evenly over its own side.
    Both { quote: U256, base: U256 },
}

impl Liquidity {
    /// Picks the solve direction from optionally supplied totals.
    pub fn from_totals(quote: Option<U256>, base: Option<U256>) -> LpResult<Self> {
        match (quote, base) {
            (Some(quote), Some(base)) => Ok(Liquidity::Both { quote, base }),
            (Some(quote), None) => Ok(Liquidity::Quote(quote)),
            (None, Some(base)) => Ok(Liquidity::Base(base)),
            (None, None) => Err(LpError::MissingLiquidityTotal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_liquidity_from_totals() {
        let q = U256::from(1_000);
        let b = U256::from(7);
        assert_eq!(
            Liquidity::from_totals(Some(q), None).unwrap(),
            Liquidity::Quote(q)
        );
        assert_eq!(
            Liquidity::from_totals(None, Some(b)).unwrap(),
            Liquidity::Base(b)
        );
        assert_eq!(
            Liquidity::from_totals(Some(q), Some(b)).unwrap(),
            Liquidity::Both { quote: q, base: b }
        );
        assert!(matches!(
            Liquidity::from_totals(None, None),
            Err(LpError::MissingLiquidityTotal)
        ));
    }

    #[test]
    fn test_price_range_validation() {
        let p = |v: u64| U256::from(v);
        assert!(PriceRange::new(p(100), p(200), p(150), None).is_ok());
        assert!(matches!(
            PriceRange::new(p(200), p(200), p(150), None),
            Err(LpError::InvalidParameter(_))
        ));
        assert!(matches!(
            PriceRange::new(U256::ZERO, p(200), p(150), None),
            Err(LpError::InvalidParameter(_))
        ));
    }
}
