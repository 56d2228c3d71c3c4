use alloy::primitives::U256;

/// Error produced while generating or sizing a batch of liquidity positions.
///
/// Generation is all-or-nothing: any of these aborts the computation and
/// no partial ladder is returned. Undersized positions are not an error,
/// see [`crate::lp::BatchLpDetails::min_size_error`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LpError {
    #[error(
        "price range too wide: {max_price_points} fee steps only reach {reachable}, end price is {end_price}"
    )]
    RangeTooWide {
        reachable: U256,
        end_price: U256,
        max_price_points: u32,
    },

    #[error("degenerate range: {0}")]
    DegenerateRange(&'static str),

    #[error("neither quote nor base liquidity total supplied")]
    MissingLiquidityTotal,

    #[error("division by zero")]
    DivisionByZero,

    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
}

/// Result type for liquidity engine operations.
pub type LpResult<T> = Result<T, LpError>;
