//! Distribution of a liquidity budget over the levels of a ladder.
//!
//! Every shape assigns each level a weight and the side total is split
//! proportionally to it in quote terms, so a level's size is its quote
//! share converted at the level's own price. The base-given solve runs the
//! same relation backwards on the ask side.

use alloy::primitives::U256;
use itertools::Itertools;

use crate::{
    error::{LpError, LpResult},
    num::fixed::{mul_div_down, mul_div_up},
    types::{Liquidity, MarketParams, OrderSide, Position, Shape},
};

use super::grid::Ladder;

/// Ladder with liquidity filled in, together with the side totals.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Allocation {
    pub bids: Vec<Position>,
    pub asks: Vec<Position>,
    pub quote_liquidity: U256,
    pub base_liquidity: U256,
}

/// Relative weights of `count` levels of one side, in ascending price
/// order.
pub fn side_weights(shape: Shape, side: OrderSide, count: usize) -> Vec<U256> {
    (0..count)
        .map(|i| {
            // levels between this one and the spread
            let from_spread = match side {
                OrderSide::Bid => count - 1 - i,
                OrderSide::Ask => i,
            };
            let weight = match shape {
                Shape::Flat => 1,
                Shape::Curve => count - from_spread,
                Shape::BidAsk => from_spread + 1,
            };
            U256::from(weight)
        })
        .collect()
}

/// Splits `total` proportionally to `weights`, rounding every share down.
///
/// The rounding remainder goes to the heaviest level so the shares add up
/// to `total` exactly.
pub fn split_total(total: U256, weights: &[U256]) -> LpResult<Vec<U256>> {
    let weight_sum = checked_sum(weights.iter().copied())?;
    if weight_sum.is_zero() {
        return Err(LpError::DegenerateRange("level weights sum to zero"));
    }

    let mut shares = weights
        .iter()
        .map(|weight| mul_div_down(total, *weight, weight_sum))
        .collect::<LpResult<Vec<_>>>()?;

    let allocated = checked_sum(shares.iter().copied())?;
    if let Some(heaviest) = weights.iter().position_max() {
        shares[heaviest] += total - allocated;
    }
    Ok(shares)
}

/// Trims a bid size whose quote value at `price` is not a whole number of
/// price units, so the rounded-up quote the book charges for it never
/// exceeds the rounded-down allocation.
pub fn normalize_bid_size(price: U256, size_precision: U256, raw_size: U256) -> LpResult<U256> {
    let charged = mul_div_up(price, raw_size, size_precision)?;
    let allotted = mul_div_down(price, raw_size, size_precision)?;
    if charged > allotted {
        Ok(raw_size.saturating_sub(mul_div_up(U256::ONE, size_precision, price)?))
    } else {
        Ok(raw_size)
    }
}

/// Fills in the ladder liquidity for the requested budget.
pub fn allocate(
    params: &MarketParams,
    ladder: &Ladder,
    shape: Shape,
    liquidity: Liquidity,
) -> LpResult<Allocation> {
    if ladder.is_empty() {
        return Err(LpError::DegenerateRange("ladder has no price levels"));
    }
    match liquidity {
        Liquidity::Quote(quote) => solve_quote(params, ladder, shape, quote),
        Liquidity::Base(base) => solve_base(params, ladder, shape, base),
        Liquidity::Both { quote, base } => solve_both(params, ladder, quote, base),
    }
}

/// Provisions both sides with `quote` worth of liquidity each; the base
/// total is what the asks add up to.
pub fn solve_quote(
    params: &MarketParams,
    ladder: &Ladder,
    shape: Shape,
    quote: U256,
) -> LpResult<Allocation> {
    if quote.is_zero() {
        return Err(LpError::DegenerateRange("quote liquidity total is zero"));
    }

    let bids = provision_bids(params, &ladder.bids, shape, quote)?;

    let ask_shares = if ladder.asks.is_empty() {
        Vec::new()
    } else {
        split_total(quote, &side_weights(shape, OrderSide::Ask, ladder.asks.len()))?
    };
    let asks = ladder
        .asks
        .iter()
        .zip_eq(ask_shares)
        .map(|(pos, share)| -> LpResult<Position> {
            Ok(pos.with_liquidity(params.quote_to_size(share, pos.price)?))
        })
        .collect::<LpResult<Vec<_>>>()?;

    let base_liquidity = checked_sum(
        asks.iter()
            .map(|pos| params.size_to_base(pos.liquidity))
            .collect::<LpResult<Vec<_>>>()?,
    )?;

    Ok(Allocation {
        bids,
        asks,
        quote_liquidity: quote,
        base_liquidity,
    })
}

/// Places `base` on the asks and mirrors the quote value they represent on
/// the bids.
///
/// With reference price `P` of the ask closest to the spread, the shape
/// weights `w_i` and ask prices `p_i`, the size of ask `i` is
/// `base * r_i / Σ r` where `r_i = w_i * P * price_precision / p_i`, which
/// keeps quote values proportional to the weights.
pub fn solve_base(
    params: &MarketParams,
    ladder: &Ladder,
    shape: Shape,
    base: U256,
) -> LpResult<Allocation> {
    let Some(reference) = ladder.asks.first().map(|pos| pos.price) else {
        return Err(LpError::DegenerateRange(
            "no ask levels to place base liquidity on",
        ));
    };
    if base.is_zero() {
        return Err(LpError::DegenerateRange("base liquidity total is zero"));
    }

    let weights = side_weights(shape, OrderSide::Ask, ladder.asks.len());
    let reciprocals = ladder
        .asks
        .iter()
        .zip_eq(&weights)
        .map(|(pos, weight)| -> LpResult<U256> {
            let weighted = weight
                .checked_mul(reference)
                .ok_or(LpError::ArithmeticOverflow)?;
            mul_div_down(weighted, params.price_precision(), pos.price)
        })
        .collect::<LpResult<Vec<_>>>()?;
    let reciprocal_sum = checked_sum(reciprocals.iter().copied())?;
    if reciprocal_sum.is_zero() {
        return Err(LpError::DegenerateRange(
            "weighted reciprocal price sum is zero",
        ));
    }

    let base_size = params.base_to_size(base)?;
    let asks = ladder
        .asks
        .iter()
        .zip_eq(reciprocals)
        .map(|(pos, reciprocal)| -> LpResult<Position> {
            Ok(pos.with_liquidity(mul_div_down(base_size, reciprocal, reciprocal_sum)?))
        })
        .collect::<LpResult<Vec<_>>>()?;

    let quote = checked_sum(
        asks.iter()
            .map(|pos| params.size_to_quote(pos.liquidity, pos.price))
            .collect::<LpResult<Vec<_>>>()?,
    )?;
    if quote.is_zero() && !ladder.bids.is_empty() {
        return Err(LpError::DegenerateRange("derived quote total is zero"));
    }

    let bids = provision_bids(params, &ladder.bids, shape, quote)?;

    Ok(Allocation {
        bids,
        asks,
        quote_liquidity: quote,
        base_liquidity: base,
    })
}

/// Spreads `quote` evenly over the bids and `base` evenly over the asks.
pub fn solve_both(
    params: &MarketParams,
    ladder: &Ladder,
    quote: U256,
    base: U256,
) -> LpResult<Allocation> {
    if quote.is_zero() && !ladder.bids.is_empty() {
        return Err(LpError::DegenerateRange("quote liquidity total is zero"));
    }
    if base.is_zero() && !ladder.asks.is_empty() {
        return Err(LpError::DegenerateRange("base liquidity total is zero"));
    }

    let bids = provision_bids(params, &ladder.bids, Shape::Flat, quote)?;

    let ask_shares = if ladder.asks.is_empty() {
        Vec::new()
    } else {
        split_total(
            base,
            &side_weights(Shape::Flat, OrderSide::Ask, ladder.asks.len()),
        )?
    };
    let asks = ladder
        .asks
        .iter()
        .zip_eq(ask_shares)
        .map(|(pos, share)| -> LpResult<Position> {
            Ok(pos.with_liquidity(params.base_to_size(share)?))
        })
        .collect::<LpResult<Vec<_>>>()?;

    Ok(Allocation {
        bids,
        asks,
        quote_liquidity: quote,
        base_liquidity: base,
    })
}

fn provision_bids(
    params: &MarketParams,
    bids: &[Position],
    shape: Shape,
    quote: U256,
) -> LpResult<Vec<Position>> {
    if bids.is_empty() {
        return Ok(Vec::new());
    }
    let shares = split_total(quote, &side_weights(shape, OrderSide::Bid, bids.len()))?;
    bids.iter()
        .zip_eq(shares)
        .map(|(pos, share)| -> LpResult<Position> {
            let raw_size = params.quote_to_size(share, pos.price)?;
            let size = normalize_bid_size(pos.price, params.size_precision(), raw_size)?;
            Ok(pos.with_liquidity(size))
        })
        .collect()
}

fn checked_sum(values: impl IntoIterator<Item = U256>) -> LpResult<U256> {
    values.into_iter().try_fold(U256::ZERO, |acc, value| {
        acc.checked_add(value).ok_or(LpError::ArithmeticOverflow)
    })
}
