//! Ladder planner for concentrated liquidity batches.
//!
//! This binary reads market parameters from the environment, computes the
//! ladder for the range and budget given on the command line and prints it.

mod config;
mod error;

use std::process::exit;

use alloy::primitives::U256;
use clap::Parser;
use lp_sdk::{
    lp::{self, LpSummary},
    num::Converter,
    types::{MarketParams, OrderSide, Position},
};
use tracing::{error, info};

use config::{CliConfig, EnvConfig, PlanConfig};

fn format_scaled(value: U256, converter: Converter) -> String {
    match converter.from_unsigned::<4>(value) {
        Ok(decimal) => format!("{decimal}"),
        Err(_) => format!("{value}"),
    }
}

fn print_side(side: OrderSide, positions: &[Position], params: &MarketParams) {
    let price_converter = params.price_converter();
    let size_converter = params.size_converter();
    // highest price on top, like a book
    for pos in positions.iter().rev() {
        println!(
            "{:<4} │ {:>20} │ {:>20} │ {:>24}",
            side.to_string(),
            format_scaled(pos.price(), price_converter),
            format_scaled(pos.flip_price(), price_converter),
            format_scaled(pos.liquidity(), size_converter),
        );
    }
}

fn run(params: &MarketParams, plan: &PlanConfig) -> error::Result<()> {
    let details = lp::batch_lp_details(params, &plan.range, plan.shape, plan.liquidity)?;
    info!(
        bids = details.bids().len(),
        asks = details.asks().len(),
        min_size_error = details.min_size_error(),
        "Ladder computed"
    );

    let (bids, asks, quote_liquidity, base_liquidity, min_size_error, batch) = if plan.normalize {
        let summary = LpSummary::from_details(params, &details)?;
        info!("Ladder rescaled to minimum size");
        (
            summary.bids().to_vec(),
            summary.asks().to_vec(),
            summary.quote_liquidity(),
            summary.base_liquidity(),
            summary.min_size_error(),
            summary.to_batch_orders(),
        )
    } else {
        (
            details.bids().to_vec(),
            details.asks().to_vec(),
            details.quote_liquidity(),
            details.base_liquidity(),
            details.min_size_error(),
            details.to_batch_orders(),
        )
    };

    println!("\n{:=^78}", " LIQUIDITY LADDER ");
    println!(
        "{:<4} │ {:>20} │ {:>20} │ {:>24}",
        "Side", "Price", "Flip Price", "Size"
    );
    println!("{:-^78}", "");
    print_side(OrderSide::Ask, &asks, params);
    println!("{:-^78}", " spread ");
    print_side(OrderSide::Bid, &bids, params);
    println!("{:=^78}", "");

    println!(
        "Quote liquidity: {}",
        format_scaled(quote_liquidity, params.quote_converter())
    );
    println!(
        "Base liquidity:  {}",
        format_scaled(base_liquidity, params.base_converter())
    );
    println!("Orders:          {}", batch.len());
    println!("Min size error:  {min_size_error}");

    if plan.calldata {
        println!(
            "Calldata:        {}",
            alloy::primitives::hex::encode_prefixed(batch.calldata(true))
        );
    }

    Ok(())
}

fn main() {
    // Load .env file
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Warning: Failed to load .env file: {}", e);
    }

    // Set up logging
    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "info");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let env_config = match EnvConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", error::Error::from(e));
            exit(1);
        }
    };

    let params = match env_config.to_market_params() {
        Ok(params) => params,
        Err(e) => {
            eprintln!("Invalid market parameters: {}", e);
            exit(1);
        }
    };

    let plan = match CliConfig::parse().to_plan_config(&params) {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("{}", error::Error::from(e));
            exit(1);
        }
    };

    if let Err(e) = run(&params, &plan) {
        error!(%e, "Failed to compute liquidity ladder");
        exit(1);
    }
}
