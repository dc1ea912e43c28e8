//! Cross-Chain Intent Agent
//!
//! An AI-powered agent that turns free-text commands ("bridge 100 USDC
//! from Sui to Ethereum") into structured intents and executes them by
//! sequencing independent financial-operation providers:
//! - Intent resolution via an OpenAI-compatible completion backend
//! - Route quoting via the LI.FI aggregator
//! - Liquidity resolution via the Yellow Network clearing layer (simulated)
//! - Cross-chain settlement via Circle CCTP (simulated)
//!
//! Data flows one direction: raw text, then a structured intent, then the
//! ordered provider calls, then one aggregated execution record per
//! request. Settlement is skipped when source and target chain match.

pub mod config;
pub mod intent;
pub mod llm;
pub mod orchestrator;
pub mod providers;
pub mod resolver;
pub mod server;

mod error;

// Re-export commonly used types
pub use config::{CompletionConfig, Config};
pub use error::{Error, Result};
pub use intent::{Action, ExecutionResult, ExecutionStatus, Intent};
pub use orchestrator::ExecutionOrchestrator;
pub use resolver::IntentResolver;
