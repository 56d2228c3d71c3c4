//! Rescaling of a computed ladder to the market minimum order size.

use alloy::primitives::U256;
use tracing::debug;

use crate::{
    error::{LpError, LpResult},
    num::fixed::mul_div_down,
    types::{BatchOrders, MarketParams, Position},
};

use super::BatchLpDetails;

/// Ladder whose smallest order on each side is exactly the market minimum
/// size, with relative sizes kept.
///
/// Aggregates are recomputed from the rescaled orders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LpSummary {
    bids: Vec<Position>,
    asks: Vec<Position>,
    quote_liquidity: U256,
    base_liquidity: U256,
    min_size_error: bool,
}

impl LpSummary {
    /// Rescale both sides of `details` to the market minimum size.
    ///
    /// A side that is empty or whose smallest order is zero is left as is.
    pub fn from_details(params: &MarketParams, details: &BatchLpDetails) -> LpResult<Self> {
        let min_size = params.min_size();
        let bids = rescale_bids(details.bids(), min_size)?;
        let asks = rescale_asks(details.asks(), min_size)?;

        let mut quote_liquidity = U256::ZERO;
        for bid in &bids {
            quote_liquidity = quote_liquidity
                .checked_add(params.size_to_quote(bid.liquidity, bid.price)?)
                .ok_or(LpError::ArithmeticOverflow)?;
        }
        let mut base_liquidity = U256::ZERO;
        for ask in &asks {
            base_liquidity = base_liquidity
                .checked_add(params.size_to_base(ask.liquidity)?)
                .ok_or(LpError::ArithmeticOverflow)?;
        }
        let min_size_error = bids.iter().chain(&asks).any(|p| p.liquidity < min_size);

        debug!(
            %quote_liquidity,
            %base_liquidity,
            min_size_error,
            "ladder rescaled to minimum size"
        );

        Ok(Self {
            bids,
            asks,
            quote_liquidity,
            base_liquidity,
            min_size_error,
        })
    }

    pub fn bids(&self) -> &[Position] {
        &self.bids
    }

    pub fn asks(&self) -> &[Position] {
        &self.asks
    }

    /// Quote asset value of the rescaled bids.
    pub fn quote_liquidity(&self) -> U256 {
        self.quote_liquidity
    }

    /// Base asset amount of the rescaled asks.
    pub fn base_liquidity(&self) -> U256 {
        self.base_liquidity
    }

    /// Whether an order is still below the minimum size, which happens
    /// only for sides left unscaled.
    pub fn min_size_error(&self) -> bool {
        self.min_size_error
    }

    pub fn to_batch_orders(&self) -> BatchOrders {
        BatchOrders::from_sides(&self.bids, &self.asks)
    }
}

fn rescale_asks(asks: &[Position], min_size: U256) -> LpResult<Vec<Position>> {
    let Some(smallest) = asks.iter().map(|p| p.liquidity).min() else {
        return Ok(Vec::new());
    };
    if smallest.is_zero() || min_size.is_zero() {
        return Ok(asks.to_vec());
    }
    scale_side(asks, min_size, smallest)
}

/// The binding bid is the smallest one, lowest price first on ties. Its
/// notional at its own price is lifted to the notional of `min_size` at that
/// same price; the price cancels, so the ratio reduces to
/// `min_size / size`.
fn rescale_bids(bids: &[Position], min_size: U256) -> LpResult<Vec<Position>> {
    let Some(smallest) = bids.iter().min_by_key(|p| (p.liquidity, p.price)) else {
        return Ok(Vec::new());
    };
    if smallest.liquidity.is_zero() || min_size.is_zero() {
        return Ok(bids.to_vec());
    }
    scale_side(bids, min_size, smallest.liquidity)
}

fn scale_side(side: &[Position], numerator: U256, denominator: U256) -> LpResult<Vec<Position>> {
    side.iter()
        .map(|pos| -> LpResult<Position> {
            Ok(pos.with_liquidity(mul_div_down(pos.liquidity, numerator, denominator)?))
        })
        .collect()
}
