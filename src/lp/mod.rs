//! Batch liquidity positions.
//!
//! A batch is computed in three stages, each a pure function of its
//! inputs:
//!
//! 1. [`grid`] walks the price range in fee-sized steps and produces
//!    tick-aligned bid and ask levels.
//! 2. [`allocation`] spreads the liquidity budget over the levels
//!    according to the requested [`Shape`].
//! 3. [`LpSummary`] optionally rescales the result so that the smallest
//!    order on each side is exactly the market minimum size.
//!
//! Use [`batch_lp_details`] to run the first two stages at once.

pub mod allocation;
pub mod grid;
mod summary;

pub use summary::LpSummary;

use alloy::primitives::U256;
use tracing::{debug, warn};

use crate::{
    error::LpResult,
    types::{BatchOrders, Liquidity, MarketParams, Position, PriceRange, Shape},
};

/// Liquidity ladder as computed from the budget.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BatchLpDetails {
    bids: Vec<Position>,
    asks: Vec<Position>,
    quote_liquidity: U256,
    base_liquidity: U256,
    min_size_error: bool,
}

impl BatchLpDetails {
    pub fn new(
        bids: Vec<Position>,
        asks: Vec<Position>,
        quote_liquidity: U256,
        base_liquidity: U256,
        params: &MarketParams,
    ) -> Self {
        let min_size_error = bids
            .iter()
            .chain(&asks)
            .any(|p| p.liquidity < params.min_size());
        Self {
            bids,
            asks,
            quote_liquidity,
            base_liquidity,
            min_size_error,
        }
    }

    /// Bid orders in ascending price order.
    pub fn bids(&self) -> &[Position] {
        &self.bids
    }

    /// Ask orders in ascending price order.
    pub fn asks(&self) -> &[Position] {
        &self.asks
    }

    /// Quote asset total backing the bids.
    pub fn quote_liquidity(&self) -> U256 {
        self.quote_liquidity
    }

    /// Base asset total backing the asks.
    pub fn base_liquidity(&self) -> U256 {
        self.base_liquidity
    }

    /// Whether any order is below the market minimum size.
    ///
    /// The book rejects such orders; rescale with [`LpSummary::from_details`]
    /// or raise the budget.
    pub fn min_size_error(&self) -> bool {
        self.min_size_error
    }

    pub fn to_batch_orders(&self) -> BatchOrders {
        BatchOrders::from_sides(&self.bids, &self.asks)
    }
}

/// Generate the ladder for `range` and size it for `liquidity`.
pub fn batch_lp_details(
    params: &MarketParams,
    range: &PriceRange,
    shape: Shape,
    liquidity: Liquidity,
) -> LpResult<BatchLpDetails> {
    let ladder = grid::generate(params, range)?;
    debug!(
        bids = ladder.bids.len(),
        asks = ladder.asks.len(),
        start_price = %range.start_price(),
        end_price = %range.end_price(),
        best_ask_price = %range.best_ask_price(),
        "price ladder generated"
    );

    let allocation = allocation::allocate(params, &ladder, shape, liquidity)?;
    let details = BatchLpDetails::new(
        allocation.bids,
        allocation.asks,
        allocation.quote_liquidity,
        allocation.base_liquidity,
        params,
    );
    debug!(
        ?shape,
        ?liquidity,
        quote_liquidity = %details.quote_liquidity,
        base_liquidity = %details.base_liquidity,
        "liquidity allocated"
    );
    if details.min_size_error {
        warn!(min_size = %params.min_size(), "ladder has orders below minimum size");
    }

    Ok(details)
}
