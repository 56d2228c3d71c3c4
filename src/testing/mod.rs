//! Test fixtures.
//!
//! [`MarketParamsBuilder`] and [`PriceRangeBuilder`] provide a convenient way
//! to create market parameters and price ranges with controlled values for
//! unit testing ladder generation and sizing.
//!
//! Defaults describe a market with two-decimal prices and sizes, an 18-decimal
//! base asset and a 6-decimal quote asset, a one-unit tick and a 30 bps fee,
//! with the book's best ask at `10000.00`.

use alloy::primitives::U256;

use crate::types::{MarketParams, PriceRange};

pub const BASE_DECIMALS: u8 = 18;
pub const QUOTE_DECIMALS: u8 = 6;

pub fn scale(amount: u64, decimals: u8) -> U256 {
    U256::from(amount) * U256::from(10).pow(U256::from(decimals))
}

/// Whole quote asset units.
pub fn quote(amount: u64) -> U256 {
    scale(amount, QUOTE_DECIMALS)
}

/// Whole base asset units.
pub fn base(amount: u64) -> U256 {
    scale(amount, BASE_DECIMALS)
}

/// Builder for test [`MarketParams`].
///
/// # Example
///
/// ```
/// use alloy::primitives::U256;
/// use lp_sdk::testing::MarketParamsBuilder;
///
/// let params = MarketParamsBuilder::new()
///     .tick_size(U256::from(5))
///     .min_size(U256::from(10))
///     .build();
/// assert_eq!(params.tick_size(), U256::from(5));
/// ```
#[derive(Clone, Debug)]
pub struct MarketParamsBuilder {
    price_precision: U256,
    size_precision: U256,
    base_asset_decimals: u8,
    quote_asset_decimals: u8,
    tick_size: U256,
    min_fees_bps: U256,
    min_size: U256,
}

impl Default for MarketParamsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketParamsBuilder {
    pub fn new() -> Self {
        Self {
            price_precision: U256::from(100),
            size_precision: U256::from(100),
            base_asset_decimals: BASE_DECIMALS,
            quote_asset_decimals: QUOTE_DECIMALS,
            tick_size: U256::ONE,
            min_fees_bps: U256::from(30),
            min_size: U256::ONE,
        }
    }

    pub fn price_precision(mut self, precision: U256) -> Self {
        self.price_precision = precision;
        self
    }

    pub fn size_precision(mut self, precision: U256) -> Self {
        self.size_precision = precision;
        self
    }

    pub fn base_asset_decimals(mut self, decimals: u8) -> Self {
        self.base_asset_decimals = decimals;
        self
    }

    pub fn quote_asset_decimals(mut self, decimals: u8) -> Self {
        self.quote_asset_decimals = decimals;
        self
    }

    pub fn tick_size(mut self, tick_size: U256) -> Self {
        self.tick_size = tick_size;
        self
    }

    pub fn min_fees_bps(mut self, fees_bps: U256) -> Self {
        self.min_fees_bps = fees_bps;
        self
    }

    pub fn min_size(mut self, min_size: U256) -> Self {
        self.min_size = min_size;
        self
    }

    /// Build the parameters, panicking if they are invalid.
    pub fn build(self) -> MarketParams {
        MarketParams::new(
            self.price_precision,
            self.size_precision,
            self.base_asset_decimals,
            self.quote_asset_decimals,
            self.tick_size,
            self.min_fees_bps,
            self.min_size,
        )
        .expect("valid market params")
    }
}

/// Builder for test [`PriceRange`]s, by default `9950.00..10050.00` around a
/// best ask of `10000.00`.
#[derive(Clone, Debug)]
pub struct PriceRangeBuilder {
    start_price: U256,
    end_price: U256,
    best_ask_price: U256,
    max_price_points: Option<u32>,
}

impl Default for PriceRangeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PriceRangeBuilder {
    pub fn new() -> Self {
        Self {
            start_price: U256::from(995_000),
            end_price: U256::from(1_005_000),
            best_ask_price: U256::from(1_000_000),
            max_price_points: None,
        }
    }

    pub fn start_price(mut self, price: U256) -> Self {
        self.start_price = price;
        self
    }

    pub fn end_price(mut self, price: U256) -> Self {
        self.end_price = price;
        self
    }

    pub fn best_ask_price(mut self, price: U256) -> Self {
        self.best_ask_price = price;
        self
    }

    pub fn max_price_points(mut self, max_price_points: u32) -> Self {
        self.max_price_points = Some(max_price_points);
        self
    }

    /// Build the range, panicking if it is invalid.
    pub fn build(self) -> PriceRange {
        PriceRange::new(
            self.start_price,
            self.end_price,
            self.best_ask_price,
            self.max_price_points,
        )
        .expect("valid price range")
    }
}
