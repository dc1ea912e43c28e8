//! Intent resolution: free text in, structured intent out
//!
//! Sends the fixed instruction prompt plus the user text to the completion
//! capability and decodes the JSON reply. Decoding is deliberately
//! forgiving: a malformed reply degrades to an `UNKNOWN` intent instead of
//! failing the request.

use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use crate::intent::Intent;
use crate::llm::CompletionClient;
use crate::{Error, Result};

/// Inputs shorter than this after trimming are rejected locally, before
/// any completion call
const MIN_COMMAND_LEN: usize = 2;

/// Fixed instruction prompt for the completion capability
const SYSTEM_PROMPT: &str = r#"You are a cross-chain DeFi assistant.
Analyze the user's intent and return a JSON object.

Supported Chains: "SEPOLIA", "SUI NET", "ETHEREUM".
Supported Tokens: "USDC", "ETH", "SUI".

Example Input: "Send 0.01 ETH to vitalik.eth"
Example Output JSON:
{
    "action": "TRANSFER",
    "source_chain": "SEPOLIA",
    "target_chain": "SEPOLIA",
    "amount": "0.01",
    "token_in": "ETH",
    "recipient": "vitalik.eth",
    "original_text": "Send 0.01 ETH to vitalik.eth"
}

Example Input: "Bridge 100 USDC to Sui"
Example Output JSON:
{
    "action": "BRIDGE",
    "source_chain": "SEPOLIA",
    "target_chain": "SUI NET",
    "amount": "100",
    "token_in": "USDC",
    "original_text": "Bridge 100 USDC to Sui"
}

If the input is irrelevant, return {"action": "UNKNOWN"}.
Return ONLY JSON. No markdown."#;

/// Turns unstructured text into a validated [`Intent`]
pub struct IntentResolver {
    completion: Arc<dyn CompletionClient>,
}

impl IntentResolver {
    pub fn new(completion: Arc<dyn CompletionClient>) -> Self {
        Self { completion }
    }

    /// Resolve free text into a structured intent.
    ///
    /// Empty or near-empty input short-circuits with
    /// [`Error::NullCommand`]; the completion capability is never called
    /// for it.
    pub async fn resolve(&self, text: &str) -> Result<Intent> {
        if text.trim().len() < MIN_COMMAND_LEN {
            warn!("Empty command received, completion call skipped");
            return Err(Error::NullCommand);
        }

        info!(text = %text, "Analyzing command");
        let reply = self.completion.complete(SYSTEM_PROMPT, text).await?;

        Ok(decode_reply(&reply, text))
    }
}

/// Decode a completion reply, degrading to an `UNKNOWN` intent when the
/// payload is not a JSON object
fn decode_reply(reply: &str, original_text: &str) -> Intent {
    let cleaned = strip_code_fences(reply);
    match serde_json::from_str::<Value>(cleaned) {
        Ok(value) if value.is_object() => Intent::from_completion(&value, original_text),
        _ => {
            warn!(reply = %cleaned, "Completion reply was not JSON, degrading to UNKNOWN intent");
            Intent::fallback(original_text)
        }
    }
}

/// Strip a leading/trailing markdown code fence from a completion reply.
///
/// Models occasionally wrap the JSON in ```json fences despite being asked
/// not to. Already-bare payloads pass through unchanged.
fn strip_code_fences(reply: &str) -> &str {
    let trimmed = reply.trim();
    let trimmed = trimmed.strip_prefix("```json").unwrap_or(trimmed);
    let trimmed = trimmed.strip_prefix("```").unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed);
    trimmed.trim()
}
