use alloy::primitives::U256;

use crate::{
    error::{LpError, LpResult},
    num::{
        self,
        fixed::{self, mul_div_down},
    },
};

use super::FEE_DENOMINATOR;

/// Scale parameters of a market, read from the order book contract.
///
/// Prices are integers scaled by `price_precision`, sizes are integers
/// scaled by `size_precision`, token amounts are in the smallest unit of
/// the respective asset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketParams {
    price_precision: U256,
    size_precision: U256,
    base_asset_decimals: u8,
    quote_asset_decimals: u8,
    tick_size: U256,
    min_fees_bps: U256,
    min_size: U256,
}

impl MarketParams {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        price_precision: U256,
        size_precision: U256,
        base_asset_decimals: u8,
        quote_asset_decimals: u8,
        tick_size: U256,
        min_fees_bps: U256,
        min_size: U256,
    ) -> LpResult<Self> {
        if !fixed::is_power_of_ten(price_precision) {
            return Err(LpError::InvalidParameter("price precision is not a power of ten"));
        }
        if !fixed::is_power_of_ten(size_precision) {
            return Err(LpError::InvalidParameter("size precision is not a power of ten"));
        }
        if tick_size.is_zero() {
            return Err(LpError::InvalidParameter("tick size is zero"));
        }
        if min_fees_bps >= U256::from(FEE_DENOMINATOR) {
            return Err(LpError::InvalidParameter("fee must be below 10000 bps"));
        }
        // Both are raised to a power of ten in notional conversions.
        fixed::pow10(base_asset_decimals)?;
        fixed::pow10(quote_asset_decimals)?;

        Ok(Self {
            price_precision,
            size_precision,
            base_asset_decimals,
            quote_asset_decimals,
            tick_size,
            min_fees_bps,
            min_size,
        })
    }

    pub fn price_precision(&self) -> U256 {
        self.price_precision
    }

    pub fn size_precision(&self) -> U256 {
        self.size_precision
    }

    pub fn base_asset_decimals(&self) -> u8 {
        self.base_asset_decimals
    }

    pub fn quote_asset_decimals(&self) -> u8 {
        self.quote_asset_decimals
    }

    pub fn tick_size(&self) -> U256 {
        self.tick_size
    }

    pub fn min_fees_bps(&self) -> U256 {
        self.min_fees_bps
    }

    pub fn min_size(&self) -> U256 {
        self.min_size
    }

    /// Number of decimal places encoded by the price precision.
    pub fn price_decimals(&self) -> u8 {
        (fixed::decimal_digit_count(self.price_precision) - 1) as u8
    }

    /// Number of decimal places encoded by the size precision.
    pub fn size_decimals(&self) -> u8 {
        (fixed::decimal_digit_count(self.size_precision) - 1) as u8
    }

    pub fn price_converter(&self) -> num::Converter {
        num::Converter::new(self.price_decimals())
    }

    pub fn size_converter(&self) -> num::Converter {
        num::Converter::new(self.size_decimals())
    }

    pub fn quote_converter(&self) -> num::Converter {
        num::Converter::new(self.quote_asset_decimals)
    }

    pub fn base_converter(&self) -> num::Converter {
        num::Converter::new(self.base_asset_decimals)
    }

    /// Quote asset amount worth `size` at `price`, rounded down.
    pub fn size_to_quote(&self, size: U256, price: U256) -> LpResult<U256> {
        let notional = size.checked_mul(price).ok_or(LpError::ArithmeticOverflow)?;
        mul_div_down(
            notional,
            fixed::pow10(self.quote_asset_decimals)?,
            self.scale_product()?,
        )
    }

    /// Size that `quote` buys at `price`, rounded down.
    pub fn quote_to_size(&self, quote: U256, price: U256) -> LpResult<U256> {
        let denominator = price
            .checked_mul(fixed::pow10(self.quote_asset_decimals)?)
            .ok_or(LpError::ArithmeticOverflow)?;
        mul_div_down(quote, self.scale_product()?, denominator)
    }

    /// Base asset amount represented by `size`, rounded down.
    pub fn size_to_base(&self, size: U256) -> LpResult<U256> {
        mul_div_down(
            size,
            fixed::pow10(self.base_asset_decimals)?,
            self.size_precision,
        )
    }

    /// Size representing `base` base asset amount, rounded down.
    pub fn base_to_size(&self, base: U256) -> LpResult<U256> {
        mul_div_down(
            base,
            self.size_precision,
            fixed::pow10(self.base_asset_decimals)?,
        )
    }

    fn scale_product(&self) -> LpResult<U256> {
        self.price_precision
            .checked_mul(self.size_precision)
            .ok_or(LpError::ArithmeticOverflow)
    }
}
