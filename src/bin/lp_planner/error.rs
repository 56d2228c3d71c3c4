//! Error types for the ladder planner.

use lp_sdk::LpError;

use crate::config::ConfigError;

/// Main error type for the ladder planner.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Environment configuration error: {0}")]
    EnvConfig(#[from] envy::Error),

    #[error("Liquidity engine error: {0}")]
    Lp(#[from] LpError),
}

pub type Result<T> = std::result::Result<T, Error>;
