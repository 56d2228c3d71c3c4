//! Tick-aligned price ladder generation.
//!
//! Consecutive levels are one fee step apart: a price is compounded by
//! `(FEE_DENOMINATOR + fee) / FEE_DENOMINATOR` and rounded down to the tick
//! grid. Whenever rounding swallows the step entirely the price advances by
//! a single tick, so the walk always makes progress.

use alloy::primitives::U256;
use tracing::trace;

use crate::{
    error::{LpError, LpResult},
    num::fixed::{ceil_to_tick, floor_to_tick, mul_div_down},
    types::{FEE_DENOMINATOR, MarketParams, Position, PriceRange},
};

/// Bid and ask levels of a generated ladder with zero liquidity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ladder {
    pub bids: Vec<Position>,
    pub asks: Vec<Position>,
}

impl Ladder {
    pub fn len(&self) -> usize {
        self.bids.len() + self.asks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

/// Price reached from `start` after compounding `max_steps` fee steps,
/// `start * (D + fee)^n / D^n` without tick rounding.
///
/// Saturates at `U256::MAX` when the result does not fit.
pub fn compute_reachable_price(min_fees_bps: U256, start: U256, max_steps: u32) -> LpResult<U256> {
    if min_fees_bps.is_zero() || start.is_zero() {
        return Ok(start);
    }
    let denominator = U256::from(FEE_DENOMINATOR);
    let numerator = denominator
        .checked_add(min_fees_bps)
        .ok_or(LpError::ArithmeticOverflow)?;
    let exp = U256::from(max_steps);

    let exact = numerator
        .checked_pow(exp)
        .zip(denominator.checked_pow(exp))
        .and_then(|(num, den)| Some((start.checked_mul(num)?, den)));
    if let Some((scaled, den)) = exact {
        return Ok(scaled / den);
    }

    // Powers do not fit, compound one step at a time. The price is carried
    // with REACHABLE_SCALE extra precision so per-step flooring can not eat
    // the growth of small prices.
    let (mut reachable, scale) = match start.checked_mul(REACHABLE_SCALE) {
        Some(scaled) => (scaled, REACHABLE_SCALE),
        None => (start, U256::ONE),
    };
    for _ in 0..max_steps {
        match reachable.checked_mul(numerator) {
            Some(scaled) => reachable = scaled / denominator,
            None => return Ok(U256::MAX),
        }
    }
    Ok(reachable / scale)
}

/// Extra precision of [`compute_reachable_price`] when compounding stepwise.
const REACHABLE_SCALE: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Next ladder price above `price`.
pub fn next_price(price: U256, min_fees_bps: U256, tick_size: U256) -> LpResult<U256> {
    let denominator = U256::from(FEE_DENOMINATOR);
    let numerator = denominator
        .checked_add(min_fees_bps)
        .ok_or(LpError::ArithmeticOverflow)?;
    let compounded = mul_div_down(price, numerator, denominator)?;
    let next = floor_to_tick(compounded, tick_size)?;
    if next <= price {
        price
            .checked_add(tick_size)
            .ok_or(LpError::ArithmeticOverflow)
    } else {
        Ok(next)
    }
}

/// Flip price of a bid at `price`: two fee steps up.
pub fn bid_flip_price(price: U256, min_fees_bps: U256, tick_size: U256) -> LpResult<U256> {
    next_price(
        next_price(price, min_fees_bps, tick_size)?,
        min_fees_bps,
        tick_size,
    )
}

/// Flip price of an ask at `price`: two fee steps down, strictly below
/// `price`.
pub fn ask_flip_price(price: U256, min_fees_bps: U256, tick_size: U256) -> LpResult<U256> {
    let denominator = U256::from(FEE_DENOMINATOR);
    let discount = denominator
        .checked_sub(min_fees_bps)
        .ok_or(LpError::InvalidParameter("fee must be below 10000 bps"))?;
    let flip = floor_to_tick(
        mul_div_down(price, discount * discount, denominator * denominator)?,
        tick_size,
    )?;
    if flip >= price {
        Ok(price.saturating_sub(tick_size))
    } else {
        Ok(flip)
    }
}

/// Generates bid levels from `start_price` up to the best ask and ask
/// levels from the best ask up to `end_price`.
///
/// With `max_price_points` set, fails with [`LpError::RangeTooWide`] if
/// that many fee steps from `start_price` do not get past `end_price`, or
/// if the ladder ends up with more levels than allowed.
pub fn generate_ladder(
    start_price: U256,
    end_price: U256,
    best_ask_price: U256,
    tick_size: U256,
    min_fees_bps: U256,
    max_price_points: Option<u32>,
) -> LpResult<Ladder> {
    if tick_size.is_zero() {
        return Err(LpError::DivisionByZero);
    }

    let reachable = match max_price_points {
        Some(max_steps) => {
            let reachable = compute_reachable_price(min_fees_bps, start_price, max_steps)?;
            if reachable <= end_price {
                return Err(LpError::RangeTooWide {
                    reachable,
                    end_price,
                    max_price_points: max_steps,
                });
            }
            Some((reachable, max_steps))
        }
        None => None,
    };
    let check_bound = |levels: usize| match reachable {
        Some((reachable, max_steps)) if levels > max_steps as usize => {
            Err(LpError::RangeTooWide {
                reachable,
                end_price,
                max_price_points: max_steps,
            })
        }
        _ => Ok(()),
    };

    let mut ladder = Ladder::default();

    let bid_limit = best_ask_price.min(end_price);
    let mut current = ceil_to_tick(start_price, tick_size)?;
    while current < bid_limit {
        let next = next_price(current, min_fees_bps, tick_size)?;
        let flip = next_price(next, min_fees_bps, tick_size)?;
        trace!(price = %current, flip_price = %flip, "bid level");
        ladder.bids.push(Position::new(current, flip, U256::ZERO));
        check_bound(ladder.len())?;
        current = next;
    }

    let mut current = ceil_to_tick(best_ask_price.max(start_price), tick_size)?;
    while current < end_price {
        let flip = ask_flip_price(current, min_fees_bps, tick_size)?;
        trace!(price = %current, flip_price = %flip, "ask level");
        ladder.asks.push(Position::new(current, flip, U256::ZERO));
        check_bound(ladder.len())?;
        current = next_price(current, min_fees_bps, tick_size)?;
    }

    Ok(ladder)
}

/// [`generate_ladder`] for a market and price range.
pub fn generate(params: &MarketParams, range: &PriceRange) -> LpResult<Ladder> {
    generate_ladder(
        range.start_price(),
        range.end_price(),
        range.best_ask_price(),
        params.tick_size(),
        params.min_fees_bps(),
        range.max_price_points(),
    )
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn u(v: u64) -> U256 {
        U256::from(v)
    }

    fn prices(side: &[Position]) -> Vec<U256> {
        side.iter().map(|p| p.price()).collect()
    }

    // ==================== next_price() tests ====================

    #[test]
    fn test_next_price_compounds_fee() {
        assert_eq!(next_price(u(995_000), u(30), u(1)).unwrap(), u(997_985));
        assert_eq!(next_price(u(1_000_000), u(30), u(1)).unwrap(), u(1_003_000));
    }

    #[test]
    fn test_next_price_rounds_to_tick() {
        // 1_003_500 floored to a 1_000 tick
        assert_eq!(next_price(u(1_000_000), u(35), u(1_000)).unwrap(), u(1_003_000));
    }

    #[test]
    fn test_next_price_forces_progress() {
        // 100 * 1.003 = 100.3 rounds back to 100
        assert_eq!(next_price(u(100), u(30), u(1)).unwrap(), u(101));
        assert_eq!(next_price(u(100), u(0), u(5)).unwrap(), u(105));
    }

    // ==================== flip price tests ====================

    #[test]
    fn test_ask_flip_price_two_steps_down() {
        assert_eq!(ask_flip_price(u(1_000_000), u(30), u(1)).unwrap(), u(994_009));
        assert_eq!(ask_flip_price(u(1_003_000), u(30), u(1)).unwrap(), u(996_991));
    }

    #[test]
    fn test_ask_flip_price_strictly_below() {
        // zero fee keeps the compounded price unchanged
        assert_eq!(ask_flip_price(u(100), u(0), u(1)).unwrap(), u(99));
        assert_eq!(ask_flip_price(u(500), u(0), u(100)).unwrap(), u(400));
    }

    #[test]
    fn test_bid_flip_price_two_steps_up() {
        assert_eq!(bid_flip_price(u(995_000), u(30), u(1)).unwrap(), u(1_000_978));
    }

    // ==================== compute_reachable_price() tests ====================

    #[test]
    fn test_reachable_price_exact() {
        assert_eq!(
            compute_reachable_price(u(30), u(995_000), 4).unwrap(),
            u(1_006_993)
        );
        assert_eq!(
            compute_reachable_price(u(30), u(995_000), 3).unwrap(),
            u(1_003_981)
        );
        assert_eq!(compute_reachable_price(u(30), u(995_000), 0).unwrap(), u(995_000));
    }

    #[test]
    fn test_reachable_price_many_steps() {
        // 10030^200 does not fit into 256 bits
        let reachable = compute_reachable_price(u(30), u(1_000_000), 200).unwrap();
        assert!(reachable > u(1_800_000));
        assert!(reachable < u(1_830_000));
    }

    #[test]
    fn test_reachable_price_small_start_keeps_growing() {
        // 100 * 1.003 floors back to 100 at unit precision
        assert_eq!(compute_reachable_price(u(30), u(100), 200).unwrap(), u(182));
        assert_eq!(compute_reachable_price(u(1), u(1), 100_000).unwrap(), u(22_015));
        assert_eq!(compute_reachable_price(U256::ZERO, u(100), 200).unwrap(), u(100));
    }

    #[test]
    fn test_reachable_price_saturates() {
        assert_eq!(
            compute_reachable_price(u(9_999), U256::MAX / u(2), 10).unwrap(),
            U256::MAX
        );
    }

    // ==================== generate_ladder() tests ====================

    #[test]
    fn test_generate_ladder_reference_example() {
        let ladder =
            generate_ladder(u(995_000), u(1_005_000), u(1_000_000), u(1), u(30), None).unwrap();

        assert_eq!(prices(&ladder.bids), vec![u(995_000), u(997_985)]);
        assert_eq!(prices(&ladder.asks), vec![u(1_000_000), u(1_003_000)]);
        assert_eq!(ladder.bids[0].flip_price(), u(1_000_978));
        assert_eq!(ladder.bids[1].flip_price(), u(1_003_980));
        assert_eq!(ladder.asks[0].flip_price(), u(994_009));
        assert_eq!(ladder.asks[1].flip_price(), u(996_991));
        assert!(ladder.bids.iter().all(|p| p.liquidity().is_zero()));

        let again =
            generate_ladder(u(995_000), u(1_005_000), u(1_000_000), u(1), u(30), None).unwrap();
        assert_eq!(ladder, again);
    }

    #[test]
    fn test_generate_ladder_invariants() {
        let tick = u(25);
        let best_ask = u(2_000_000);
        let ladder =
            generate_ladder(u(1_800_010), u(2_300_000), best_ask, tick, u(15), None).unwrap();

        assert!(!ladder.bids.is_empty());
        assert!(!ladder.asks.is_empty());
        for pos in ladder.bids.iter().chain(&ladder.asks) {
            assert!((pos.price() % tick).is_zero());
            assert!((pos.flip_price() % tick).is_zero());
        }
        assert!(ladder.bids.iter().all(|p| p.price() < best_ask));
        assert!(ladder.bids.iter().all(|p| p.flip_price() > p.price()));
        assert!(ladder.asks.iter().all(|p| p.price() >= best_ask));
        assert!(ladder.asks.iter().all(|p| p.flip_price() < p.price()));
        assert!(
            ladder
                .bids
                .iter()
                .tuple_windows()
                .all(|(a, b)| a.price() < b.price())
        );
        assert!(
            ladder
                .asks
                .iter()
                .tuple_windows()
                .all(|(a, b)| a.price() < b.price())
        );
        assert_eq!(ladder.bids[0].price(), u(1_800_025));
    }

    #[test]
    fn test_generate_ladder_range_below_best_ask() {
        let ladder =
            generate_ladder(u(900_000), u(950_000), u(1_000_000), u(1), u(100), None).unwrap();
        assert!(ladder.asks.is_empty());
        assert!(ladder.bids.iter().all(|p| p.price() < u(950_000)));
    }

    #[test]
    fn test_generate_ladder_range_above_best_ask() {
        let ladder =
            generate_ladder(u(1_100_000), u(1_200_000), u(1_000_000), u(1), u(100), None).unwrap();
        assert!(ladder.bids.is_empty());
        assert_eq!(ladder.asks[0].price(), u(1_100_000));
    }

    #[test]
    fn test_generate_ladder_max_price_points() {
        let ladder =
            generate_ladder(u(995_000), u(1_005_000), u(1_000_000), u(1), u(30), Some(4)).unwrap();
        assert_eq!(ladder.len(), 4);

        let res = generate_ladder(u(995_000), u(1_005_000), u(1_000_000), u(1), u(30), Some(3));
        assert!(matches!(
            res,
            Err(LpError::RangeTooWide {
                max_price_points: 3,
                ..
            })
        ));
    }

    #[test]
    fn test_generate_ladder_small_prices_within_bound() {
        // every step is forced to a single tick
        let unbounded = generate_ladder(u(100), u(150), u(125), u(1), u(30), None).unwrap();
        assert_eq!(unbounded.len(), 50);

        let bounded = generate_ladder(u(100), u(150), u(125), u(1), u(30), Some(200)).unwrap();
        assert_eq!(bounded, unbounded);
    }

    #[test]
    fn test_generate_ladder_zero_fee_with_bound_fails() {
        let res = generate_ladder(u(100), u(110), u(105), u(1), U256::ZERO, Some(1_000));
        assert!(matches!(res, Err(LpError::RangeTooWide { .. })));
    }

    #[test]
    fn test_generate_ladder_zero_tick() {
        let res = generate_ladder(u(100), u(110), u(105), U256::ZERO, u(30), None);
        assert!(matches!(res, Err(LpError::DivisionByZero)));
    }
}
