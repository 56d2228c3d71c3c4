#[allow(clippy::too_many_arguments)]
pub mod book {
    alloy::sol!(
        /// Order book entry point placing a batch of flip orders in one call.
        #[derive(Debug, PartialEq, Eq)]
        interface OrderBook {
            function batchProvisionLiquidity(
                uint256[] calldata prices,
                uint256[] calldata flipPrices,
                uint256[] calldata sizes,
                bool[] calldata isBuy,
                bool provisionOrRevert
            ) external;
        }
    );
}
