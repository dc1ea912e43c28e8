//! Error types for the cross-chain intent agent

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Empty command: say something actionable")]
    NullCommand,

    #[error("Completion provider error: {0}")]
    Completion(String),

    #[error("Route quote error: {0}")]
    Quote(String),

    #[error("Liquidity resolution error: {0}")]
    Liquidity(String),

    #[error("Settlement error: {0}")]
    Settlement(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
