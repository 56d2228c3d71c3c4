//! Configuration for the ladder planner.
//!
//! Configuration comes from two sources:
//! - Environment variables (via .env file or shell): market scale parameters
//! - CLI arguments: price range, shape and liquidity budget

use alloy::primitives::U256;
use clap::{Parser, ValueEnum};
use fastnum::{UD128, decimal::Context};
use lp_sdk::{
    LpError,
    num::Converter,
    types::{Liquidity, MarketParams, PriceRange, Shape},
};

/// Market scale parameters, as read from the order book contract.
#[derive(Debug, serde::Deserialize)]
pub struct EnvConfig {
    /// Price precision, a power of ten (e.g. 100 for two decimals)
    pub price_precision: u64,

    /// Size precision, a power of ten
    pub size_precision: u64,

    /// Decimals of the base asset token
    pub base_asset_decimals: u8,

    /// Decimals of the quote asset token
    pub quote_asset_decimals: u8,

    /// Tick size in price precision units
    pub tick_size: u64,

    /// Minimum fee in basis points, sets the ladder step
    pub min_fees_bps: u64,

    /// Minimum order size in size precision units
    pub min_size: u64,
}

impl EnvConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    pub fn to_market_params(&self) -> Result<MarketParams, LpError> {
        MarketParams::new(
            U256::from(self.price_precision),
            U256::from(self.size_precision),
            self.base_asset_decimals,
            self.quote_asset_decimals,
            U256::from(self.tick_size),
            U256::from(self.min_fees_bps),
            U256::from(self.min_size),
        )
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum ShapeArg {
    /// Same quote value at every level
    #[default]
    Flat,
    /// Liquidity concentrated around the spread
    Curve,
    /// Liquidity concentrated at the range edges
    BidAsk,
}

impl From<ShapeArg> for Shape {
    fn from(value: ShapeArg) -> Self {
        match value {
            ShapeArg::Flat => Shape::Flat,
            ShapeArg::Curve => Shape::Curve,
            ShapeArg::BidAsk => Shape::BidAsk,
        }
    }
}

/// CLI arguments for the ladder planner.
#[derive(Debug, Parser)]
#[command(name = "lp_planner")]
#[command(about = "Compute a concentrated liquidity order ladder for a batch call")]
pub struct CliConfig {
    /// Lowest price of the range (e.g., 1950.5)
    #[arg(long)]
    pub start_price: String,

    /// Price the range ends below
    #[arg(long)]
    pub end_price: String,

    /// Current best ask of the book
    #[arg(long)]
    pub best_ask_price: String,

    /// Liquidity distribution shape
    #[arg(long, value_enum, default_value = "flat")]
    pub shape: ShapeArg,

    /// Quote asset budget in whole tokens
    #[arg(long)]
    pub quote_liquidity: Option<String>,

    /// Base asset budget in whole tokens
    #[arg(long)]
    pub base_liquidity: Option<String>,

    /// Maximum number of price levels
    #[arg(long)]
    pub max_price_points: Option<u32>,

    /// Rescale the ladder so its smallest orders match the minimum size
    #[arg(long)]
    pub normalize: bool,

    /// Print ABI-encoded calldata of the batch call
    #[arg(long)]
    pub calldata: bool,
}

/// Everything needed to compute a ladder, in market units.
#[derive(Clone, Debug)]
pub struct PlanConfig {
    pub range: PriceRange,
    pub shape: Shape,
    pub liquidity: Liquidity,
    pub normalize: bool,
    pub calldata: bool,
}

impl CliConfig {
    /// Convert human-readable CLI values to market units.
    pub fn to_plan_config(&self, params: &MarketParams) -> Result<PlanConfig, ConfigError> {
        let price_converter = params.price_converter();
        let start_price = parse_scaled("start_price", &self.start_price, price_converter)?;
        let end_price = parse_scaled("end_price", &self.end_price, price_converter)?;
        let best_ask_price = parse_scaled("best_ask_price", &self.best_ask_price, price_converter)?;

        let quote = self
            .quote_liquidity
            .as_deref()
            .map(|v| parse_scaled("quote_liquidity", v, params.quote_converter()))
            .transpose()?;
        let base = self
            .base_liquidity
            .as_deref()
            .map(|v| parse_scaled("base_liquidity", v, params.base_converter()))
            .transpose()?;

        Ok(PlanConfig {
            range: PriceRange::new(start_price, end_price, best_ask_price, self.max_price_points)?,
            shape: self.shape.into(),
            liquidity: Liquidity::from_totals(quote, base)?,
            normalize: self.normalize,
            calldata: self.calldata,
        })
    }
}

fn parse_scaled(name: &str, value: &str, converter: Converter) -> Result<U256, ConfigError> {
    let decimal = UD128::from_str(value, Context::default())
        .map_err(|_| ConfigError::InvalidDecimal(name.to_string()))?;
    Ok(converter.to_unsigned(decimal))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid decimal value for {0}")]
    InvalidDecimal(String),

    #[error(transparent)]
    Lp(#[from] LpError),
}
