use alloy::primitives::{Bytes, U256};
use alloy_sol_types::SolCall;
use itertools::{Itertools, multiunzip};

use crate::abi::book::OrderBook::batchProvisionLiquidityCall;

use super::*;

/// Ladder flattened into the parallel arrays the batch provisioning call
/// takes. Bids come first, then asks, each in ascending price order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchOrders {
    pub prices: Vec<U256>,
    pub flip_prices: Vec<U256>,
    pub sizes: Vec<U256>,
    pub is_buy: Vec<bool>,
}

impl BatchOrders {
    pub fn from_sides(bids: &[Position], asks: &[Position]) -> Self {
        let (prices, flip_prices, sizes, is_buy) = multiunzip(
            bids.iter()
                .map(|p| (p, OrderSide::Bid))
                .chain(asks.iter().map(|p| (p, OrderSide::Ask)))
                .map(|(p, side)| (p.price, p.flip_price, p.liquidity, side.is_buy())),
        );
        Self {
            prices,
            flip_prices,
            sizes,
            is_buy,
        }
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Iterates over the orders as `(side, position)` pairs.
    pub fn orders(&self) -> impl Iterator<Item = (OrderSide, Position)> + '_ {
        self.prices
            .iter()
            .zip_eq(&self.flip_prices)
            .zip_eq(&self.sizes)
            .zip_eq(&self.is_buy)
            .map(|(((price, flip), size), is_buy)| {
                (OrderSide::from(*is_buy), Position::new(*price, *flip, *size))
            })
    }

    /// Prepare the batch for execution.
    ///
    /// With `provision_or_revert` set the whole call reverts if any single
    /// order can not be placed.
    pub fn into_call(self, provision_or_revert: bool) -> batchProvisionLiquidityCall {
        batchProvisionLiquidityCall {
            prices: self.prices,
            flipPrices: self.flip_prices,
            sizes: self.sizes,
            isBuy: self.is_buy,
            provisionOrRevert: provision_or_revert,
        }
    }

    /// ABI-encoded calldata of [`Self::into_call`].
    pub fn calldata(&self, provision_or_revert: bool) -> Bytes {
        self.clone().into_call(provision_or_revert).abi_encode().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(price: u64, flip: u64, size: u64) -> Position {
        Position::new(U256::from(price), U256::from(flip), U256::from(size))
    }

    #[test]
    fn test_batch_orders_from_sides() {
        let bids = [pos(98, 100, 5), pos(99, 101, 6)];
        let asks = [pos(100, 98, 7)];
        let batch = BatchOrders::from_sides(&bids, &asks);

        assert_eq!(batch.len(), 3);
        assert_eq!(
            batch.prices,
            vec![U256::from(98), U256::from(99), U256::from(100)]
        );
        assert_eq!(
            batch.flip_prices,
            vec![U256::from(100), U256::from(101), U256::from(98)]
        );
        assert_eq!(batch.sizes, vec![U256::from(5), U256::from(6), U256::from(7)]);
        assert_eq!(batch.is_buy, vec![true, true, false]);

        let orders: Vec<_> = batch.orders().collect();
        assert_eq!(orders[0], (OrderSide::Bid, bids[0]));
        assert_eq!(orders[2], (OrderSide::Ask, asks[0]));
    }

    #[test]
    fn test_batch_orders_calldata_roundtrip() {
        let batch = BatchOrders::from_sides(&[pos(98, 100, 5)], &[pos(100, 98, 7)]);
        let calldata = batch.calldata(true);

        assert_eq!(
            &calldata[..4],
            batchProvisionLiquidityCall::SELECTOR.as_slice()
        );
        let decoded = batchProvisionLiquidityCall::abi_decode(&calldata).unwrap();
        assert_eq!(decoded, batch.into_call(true));
    }

    #[test]
    fn test_batch_orders_empty() {
        let batch = BatchOrders::from_sides(&[], &[]);
        assert!(batch.is_empty());
        assert_eq!(batch.orders().count(), 0);
    }
}
