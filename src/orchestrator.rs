//! Execution orchestrator
//!
//! Sequences the provider adapters for a resolved intent: route quoting,
//! liquidity resolution, then settlement, with the settlement leg skipped
//! for single-chain operations. One linear pass per intent, no retries.

use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};
use uuid::Uuid;

use crate::intent::{
    Action, ExecutionResult, ExecutionStatus, Intent, SETTLEMENT_NOT_APPLICABLE,
};
use crate::providers::{LiquidityProvider, QuoteProvider, RouteRequest, SettlementProvider};

/// Runs the fixed quote / liquidity / settle pipeline for an intent.
///
/// Holds the provider adapters by interface; stateless otherwise, safe to
/// share across concurrent requests.
pub struct ExecutionOrchestrator {
    quote: Arc<dyn QuoteProvider>,
    liquidity: Arc<dyn LiquidityProvider>,
    settlement: Arc<dyn SettlementProvider>,
}

impl ExecutionOrchestrator {
    pub fn new(
        quote: Arc<dyn QuoteProvider>,
        liquidity: Arc<dyn LiquidityProvider>,
        settlement: Arc<dyn SettlementProvider>,
    ) -> Self {
        Self {
            quote,
            liquidity,
            settlement,
        }
    }

    /// Execute a resolved intent.
    ///
    /// Always returns a well-formed record: provider failures become
    /// `status = ERROR`, never a transport-level fault.
    pub async fn execute(&self, intent: &Intent) -> ExecutionResult {
        let started = Instant::now();

        match intent.action {
            Action::Swap | Action::Bridge | Action::Transfer => {}
            Action::Unknown => {
                warn!(text = %intent.original_text, "Unsupported action, nothing to execute");
                return ExecutionResult::unknown_action(elapsed_ms(started));
            }
        }

        info!(
            action = ?intent.action,
            source_chain = %intent.source_chain,
            target_chain = %intent.target_chain,
            "Executing intent"
        );

        // Route quoting. A failure here is fatal: later steps never run.
        let request = RouteRequest {
            source_chain: intent.source_chain.clone(),
            target_chain: intent.target_chain.clone(),
            token_in: intent.token_in.clone(),
            token_out: intent.token_out.clone(),
            amount: intent.amount,
        };
        let quote = match self.quote.best_route(&request).await {
            Ok(quote) => quote,
            Err(e) => {
                warn!(error = %e, "Route quoting failed");
                return ExecutionResult::failed(e.to_string(), elapsed_ms(started));
            }
        };

        // Liquidity resolution. Advisory: a negative or failed check is
        // attached as a warning and never gates continuation.
        let (liquidity_ok, liquidity_warning) = match self.liquidity.solve(&intent.pair()).await {
            Ok(true) => (Some(true), None),
            Ok(false) => (
                Some(false),
                Some(format!("degraded liquidity for {}", intent.pair())),
            ),
            Err(e) => {
                warn!(error = %e, "Liquidity resolution failed, continuing");
                (None, Some(format!("liquidity check unavailable: {}", e)))
            }
        };

        // Settlement, skipped when the operation stays on one chain.
        let settlement_reference = if intent.is_same_chain() {
            info!(chain = %intent.source_chain, "Single-chain operation, settlement skipped");
            SETTLEMENT_NOT_APPLICABLE.to_string()
        } else {
            match self
                .settlement
                .transfer(intent.amount, &intent.source_chain, &intent.target_chain)
                .await
            {
                Ok(reference) => reference,
                Err(e) => {
                    warn!(error = %e, "Settlement failed");
                    // The quote stays on the record for diagnostics.
                    return ExecutionResult {
                        status: ExecutionStatus::Error,
                        route: Some(quote.route),
                        estimated_cost: Some(quote.estimated_cost),
                        liquidity_ok,
                        liquidity_warning,
                        settlement_reference: None,
                        correlation_id: None,
                        duration_ms: elapsed_ms(started),
                        error: Some(e.to_string()),
                    };
                }
            }
        };

        ExecutionResult {
            status: ExecutionStatus::Completed,
            route: Some(quote.route),
            estimated_cost: Some(quote.estimated_cost),
            liquidity_ok,
            liquidity_warning,
            settlement_reference: Some(settlement_reference),
            correlation_id: Some(Uuid::new_v4().to_string()),
            duration_ms: elapsed_ms(started),
            error: None,
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::RouteQuote;
    use crate::{Error, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeQuote {
        calls: AtomicUsize,
        fail: bool,
    }

    impl FakeQuote {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: true,
            })
        }
    }

    #[async_trait]
    impl QuoteProvider for FakeQuote {
        async fn best_route(&self, _request: &RouteRequest) -> Result<RouteQuote> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::Quote("quote backend down".to_string()));
            }
            Ok(RouteQuote {
                route: "FAKE_ROUTE".to_string(),
                estimated_cost: "~$0.0100 USD".to_string(),
            })
        }
    }

    struct FakeLiquidity {
        calls: AtomicUsize,
        depth: bool,
    }

    impl FakeLiquidity {
        fn with_depth(depth: bool) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                depth,
            })
        }
    }

    #[async_trait]
    impl LiquidityProvider for FakeLiquidity {
        async fn solve(&self, _pair: &str) -> Result<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.depth)
        }
    }

    struct FakeSettlement {
        calls: AtomicUsize,
        fail: bool,
    }

    impl FakeSettlement {
        fn ok() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: false,
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                fail: true,
            })
        }
    }

    #[async_trait]
    impl SettlementProvider for FakeSettlement {
        async fn transfer(
            &self,
            _amount: f64,
            _source_chain: &str,
            _target_chain: &str,
        ) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::Settlement("attestation timed out".to_string()));
            }
            Ok("0xFakeMintHash_1".to_string())
        }
    }

    fn bridge_intent() -> Intent {
        Intent {
            action: Action::Bridge,
            source_chain: "SEPOLIA".to_string(),
            target_chain: "SUI NET".to_string(),
            token_in: "USDC".to_string(),
            token_out: "USDC".to_string(),
            amount: 100.0,
            recipient: None,
            original_text: "Bridge 100 USDC to Sui".to_string(),
            confidence: None,
        }
    }

    #[tokio::test]
    async fn unknown_action_makes_no_provider_calls() {
        let quote = FakeQuote::ok();
        let liquidity = FakeLiquidity::with_depth(true);
        let settlement = FakeSettlement::ok();
        let orchestrator =
            ExecutionOrchestrator::new(quote.clone(), liquidity.clone(), settlement.clone());

        let intent = Intent {
            action: Action::Unknown,
            ..bridge_intent()
        };
        let result = orchestrator.execute(&intent).await;

        assert_eq!(result.status, ExecutionStatus::UnknownAction);
        assert_eq!(quote.calls.load(Ordering::SeqCst), 0);
        assert_eq!(liquidity.calls.load(Ordering::SeqCst), 0);
        assert_eq!(settlement.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn cross_chain_execution_completes() {
        let orchestrator = ExecutionOrchestrator::new(
            FakeQuote::ok(),
            FakeLiquidity::with_depth(true),
            FakeSettlement::ok(),
        );

        let result = orchestrator.execute(&bridge_intent()).await;

        assert_eq!(result.status, ExecutionStatus::Completed);
        assert_eq!(result.route.as_deref(), Some("FAKE_ROUTE"));
        assert!(!result.settlement_reference.as_deref().unwrap().is_empty());
        assert!(!result.correlation_id.as_deref().unwrap().is_empty());
        assert_eq!(result.error, None);
    }

    #[tokio::test]
    async fn same_chain_skips_settlement() {
        let settlement = FakeSettlement::ok();
        let orchestrator = ExecutionOrchestrator::new(
            FakeQuote::ok(),
            FakeLiquidity::with_depth(true),
            settlement.clone(),
        );

        let intent = Intent {
            target_chain: "sepolia".to_string(),
            action: Action::Swap,
            ..bridge_intent()
        };
        let result = orchestrator.execute(&intent).await;

        assert_eq!(result.status, ExecutionStatus::Completed);
        assert_eq!(
            result.settlement_reference.as_deref(),
            Some(SETTLEMENT_NOT_APPLICABLE)
        );
        assert_eq!(settlement.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn quote_failure_short_circuits() {
        let liquidity = FakeLiquidity::with_depth(true);
        let settlement = FakeSettlement::ok();
        let orchestrator = ExecutionOrchestrator::new(
            FakeQuote::failing(),
            liquidity.clone(),
            settlement.clone(),
        );

        let result = orchestrator.execute(&bridge_intent()).await;

        assert_eq!(result.status, ExecutionStatus::Error);
        assert!(result.error.unwrap().contains("quote backend down"));
        assert_eq!(result.settlement_reference, None);
        assert_eq!(liquidity.calls.load(Ordering::SeqCst), 0);
        assert_eq!(settlement.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn settlement_failure_keeps_quote_for_diagnostics() {
        let orchestrator = ExecutionOrchestrator::new(
            FakeQuote::ok(),
            FakeLiquidity::with_depth(true),
            FakeSettlement::failing(),
        );

        let result = orchestrator.execute(&bridge_intent()).await;

        assert_eq!(result.status, ExecutionStatus::Error);
        assert_eq!(result.route.as_deref(), Some("FAKE_ROUTE"));
        assert_eq!(result.settlement_reference, None);
        assert!(result.error.unwrap().contains("attestation timed out"));
    }

    #[tokio::test]
    async fn shallow_liquidity_attaches_warning_but_continues() {
        let orchestrator = ExecutionOrchestrator::new(
            FakeQuote::ok(),
            FakeLiquidity::with_depth(false),
            FakeSettlement::ok(),
        );

        let result = orchestrator.execute(&bridge_intent()).await;

        assert_eq!(result.status, ExecutionStatus::Completed);
        assert_eq!(result.liquidity_ok, Some(false));
        assert!(result.liquidity_warning.unwrap().contains("USDC/USDC"));
    }
}
