//! Yellow Network liquidity adapter (simulated)
//!
//! Stands in for the clearing layer: reports whether deep liquidity exists
//! for a pair. The simulation always clears via state channels.

use async_trait::async_trait;
use tracing::info;

use super::LiquidityProvider;
use crate::Result;

/// Liquidity resolution against the Yellow Network clearing layer
pub struct YellowClearingProvider {
    node_id: String,
}

impl YellowClearingProvider {
    pub fn new() -> Self {
        Self {
            node_id: "node-intent-01".to_string(),
        }
    }

    pub fn with_node_id(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
        }
    }
}

impl Default for YellowClearingProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LiquidityProvider for YellowClearingProvider {
    async fn solve(&self, pair: &str) -> Result<bool> {
        info!(node_id = %self.node_id, pair = %pair, "Solving liquidity fragmentation");
        info!("Clearing simulated via state channels");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn simulated_clearing_reports_depth() {
        let provider = YellowClearingProvider::with_node_id("node-test");
        assert!(provider.solve("USDC/USDC").await.unwrap());
    }
}
