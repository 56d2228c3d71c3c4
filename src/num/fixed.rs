//! Fixed-point multiply-divide primitives on 256-bit unsigned integers.
//!
//! The product `x * y` must fit into 256 bits; there is no 512-bit
//! intermediate. Amounts handled here are token amounts scaled by market
//! precisions, which stay far below that bound.
//!
//! [`mul_div_round`] is not used by the ladder engine, which always rounds
//! in a fixed direction; it is provided for callers.

use alloy::primitives::U256;

use crate::error::{LpError, LpResult};

fn checked_product(x: U256, y: U256, d: U256) -> LpResult<U256> {
    if d.is_zero() {
        return Err(LpError::DivisionByZero);
    }
    x.checked_mul(y).ok_or(LpError::ArithmeticOverflow)
}

/// Floor-rounded `(x * y) / d`.
pub fn mul_div_down(x: U256, y: U256, d: U256) -> LpResult<U256> {
    Ok(checked_product(x, y, d)? / d)
}

/// Ceiling-rounded `(x * y) / d`.
pub fn mul_div_up(x: U256, y: U256, d: U256) -> LpResult<U256> {
    let (quotient, remainder) = checked_product(x, y, d)?.div_rem(d);
    if remainder.is_zero() {
        Ok(quotient)
    } else {
        Ok(quotient + U256::ONE)
    }
}

/// `(x * y) / d` rounded to nearest, halves rounded up.
pub fn mul_div_round(x: U256, y: U256, d: U256) -> LpResult<U256> {
    let product = checked_product(x, y, d)?;
    let half = d / U256::from(2u8);
    Ok(product.checked_add(half).ok_or(LpError::ArithmeticOverflow)? / d)
}

/// Number of base-10 digits of `n`. Zero has one digit.
pub fn decimal_digit_count(n: U256) -> u32 {
    let ten = U256::from(10u8);
    let mut digits = 1;
    let mut rest = n / ten;
    while !rest.is_zero() {
        digits += 1;
        rest /= ten;
    }
    digits
}

/// Whether `n` is `10^k` for some `k`.
pub fn is_power_of_ten(n: U256) -> bool {
    let digits = decimal_digit_count(n);
    u8::try_from(digits - 1)
        .ok()
        .and_then(|exp| pow10(exp).ok())
        .is_some_and(|power| power == n)
}

/// `10^exp`, failing if it does not fit into 256 bits.
pub fn pow10(exp: u8) -> LpResult<U256> {
    U256::from(10u8)
        .checked_pow(U256::from(exp))
        .ok_or(LpError::ArithmeticOverflow)
}

/// Rounds `value` down to a multiple of `tick`.
pub fn floor_to_tick(value: U256, tick: U256) -> LpResult<U256> {
    if tick.is_zero() {
        return Err(LpError::DivisionByZero);
    }
    Ok(value - value % tick)
}

/// Rounds `value` up to a multiple of `tick`.
pub fn ceil_to_tick(value: U256, tick: U256) -> LpResult<U256> {
    let floored = floor_to_tick(value, tick)?;
    if floored == value {
        Ok(value)
    } else {
        floored.checked_add(tick).ok_or(LpError::ArithmeticOverflow)
    }
}
