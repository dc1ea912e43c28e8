//! Provider adapters for the execution pipeline
//!
//! Each adapter exposes one operation behind a trait, so the orchestrator
//! holds them by interface and tests substitute deterministic fakes.

mod circle;
mod lifi;
mod yellow;

pub use circle::CircleCctpProvider;
pub use lifi::LifiQuoteProvider;
pub use yellow::YellowClearingProvider;

use async_trait::async_trait;

use crate::Result;

/// Inputs for route quoting
#[derive(Debug, Clone)]
pub struct RouteRequest {
    pub source_chain: String,
    pub target_chain: String,
    pub token_in: String,
    pub token_out: String,
    pub amount: f64,
}

/// Route and cost estimate returned by quoting
#[derive(Debug, Clone)]
pub struct RouteQuote {
    pub route: String,
    pub estimated_cost: String,
}

/// Estimates cost and path for converting or moving one asset into another
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    async fn best_route(&self, request: &RouteRequest) -> Result<RouteQuote>;
}

/// Checks that tradable depth exists for an asset pair
#[async_trait]
pub trait LiquidityProvider: Send + Sync {
    async fn solve(&self, pair: &str) -> Result<bool>;
}

/// Moves value between two distinct execution environments
#[async_trait]
pub trait SettlementProvider: Send + Sync {
    async fn transfer(&self, amount: f64, source_chain: &str, target_chain: &str)
        -> Result<String>;
}
