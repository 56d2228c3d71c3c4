//! Concentrated liquidity SDK for an on-chain limit order book.
//!
//! # Overview
//!
//! Computes, client side, the set of resting orders a market making strategy
//! places across a price range in a single batch call.
//!
//! Use [`lp::batch_lp_details`] with [`types::MarketParams`] read from the
//! book contract, a [`types::PriceRange`] anchored at the current best ask,
//! a [`types::Shape`] and a [`types::Liquidity`] budget to get the ladder of
//! positions. If some orders fall below the market minimum size, rescale the
//! ladder with [`lp::LpSummary::from_details`].
//!
//! Flatten the result with [`lp::BatchLpDetails::to_batch_orders`] and hand
//! [`types::BatchOrders::into_call`] to a transaction builder.
//!
//! All amounts are integers scaled by the market precisions; nothing here
//! touches floating point or the network.
//!
//! # Limitations/follow-ups
//!
//! * The engine computes from a single snapshot of market data, it does not
//!   guard against the book moving before the batch lands.
//!
//! * Reading market parameters and the best ask from the chain is left to
//!   the caller.
//!
//! # Testing
//!
//! [`testing`] module provides builders for market parameters and price
//! ranges with sensible defaults.

pub mod abi;
pub mod error;
pub mod lp;
pub mod num;
pub mod testing;
pub mod types;

pub use error::{LpError, LpResult};
pub use lp::{BatchLpDetails, LpSummary, batch_lp_details};
