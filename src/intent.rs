//! Domain model: structured intents and execution records

use serde::Serialize;
use serde_json::Value;

use crate::config::normalize_chain;

/// Sentinel settlement reference recorded when a single-chain operation
/// needs no cross-chain settlement
pub const SETTLEMENT_NOT_APPLICABLE: &str = "NOT_APPLICABLE";

/// Operation requested by the user
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    Swap,
    Bridge,
    Transfer,
    #[default]
    Unknown,
}

impl Action {
    /// Parse a model-provided action label.
    ///
    /// The upstream model is not fully consistent: bridging sometimes
    /// comes back as "BRIDGE ASSETS" and transfers as "SEND".
    pub fn parse(label: &str) -> Self {
        let upper = label.trim().to_uppercase();
        match upper.as_str() {
            "SWAP" => Action::Swap,
            "TRANSFER" | "SEND" => Action::Transfer,
            s if s.starts_with("BRIDGE") => Action::Bridge,
            _ => Action::Unknown,
        }
    }
}

/// Structured command derived from free text.
///
/// Immutable once produced: the resolver builds it, the orchestrator reads
/// it, and it is discarded when the request completes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Intent {
    pub action: Action,
    pub source_chain: String,
    pub target_chain: String,
    pub token_in: String,
    pub token_out: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    /// Verbatim inbound text, kept for diagnostics
    pub original_text: String,
    /// Resolver's self-reported certainty, informational only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Intent {
    /// Degraded intent used when the completion reply is not a JSON object
    pub fn fallback(original_text: &str) -> Self {
        Self {
            action: Action::Unknown,
            original_text: original_text.to_string(),
            ..Default::default()
        }
    }

    /// Build an intent from a decoded completion reply.
    ///
    /// Extraction is permissive: missing string fields default to empty,
    /// amounts accept numbers and numeric strings, `token_out` falls back
    /// to `token_in` for same-asset bridge/transfer flows, and negative
    /// amounts clamp to zero.
    pub fn from_completion(value: &Value, original_text: &str) -> Self {
        let action = value
            .get("action")
            .and_then(Value::as_str)
            .map(Action::parse)
            .unwrap_or(Action::Unknown);

        let token_in = string_field(value, "token_in").to_uppercase();
        let mut token_out = string_field(value, "token_out").to_uppercase();
        if token_out.is_empty() {
            token_out = token_in.clone();
        }

        let recipient = value
            .get("recipient")
            .or_else(|| value.get("user_address"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .filter(|s| !s.is_empty());

        Self {
            action,
            source_chain: normalize_chain(&string_field(value, "source_chain")),
            target_chain: normalize_chain(&string_field(value, "target_chain")),
            token_in,
            token_out,
            amount: numeric_field(value, "amount").max(0.0),
            recipient,
            original_text: original_text.to_string(),
            confidence: value.get("confidence").and_then(numeric_value),
        }
    }

    /// Whether the operation stays on one chain (settlement not needed)
    pub fn is_same_chain(&self) -> bool {
        self.source_chain.eq_ignore_ascii_case(&self.target_chain)
    }

    /// Trading pair handed to liquidity resolution
    pub fn pair(&self) -> String {
        format!("{}/{}", self.token_in, self.token_out)
    }
}

/// Terminal status of one orchestration run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    Completed,
    Error,
    UnknownAction,
}

/// Aggregated outcome of one orchestration run.
///
/// Created fresh per request, returned to the caller, never mutated
/// afterward. `Error` implies no settlement reference; `Completed` implies
/// every step for the action produced a value, with the
/// [`SETTLEMENT_NOT_APPLICABLE`] sentinel standing in where settlement was
/// skipped by design.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    pub status: ExecutionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquidity_ok: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquidity_warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settlement_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionResult {
    /// Record for an action the orchestrator does not support
    pub(crate) fn unknown_action(duration_ms: u64) -> Self {
        Self {
            status: ExecutionStatus::UnknownAction,
            route: None,
            estimated_cost: None,
            liquidity_ok: None,
            liquidity_warning: None,
            settlement_reference: None,
            correlation_id: None,
            duration_ms,
            error: None,
        }
    }

    /// Record for a step failure before any partial results exist
    pub(crate) fn failed(error: String, duration_ms: u64) -> Self {
        Self {
            status: ExecutionStatus::Error,
            route: None,
            estimated_cost: None,
            liquidity_ok: None,
            liquidity_warning: None,
            settlement_reference: None,
            correlation_id: None,
            duration_ms,
            error: Some(error),
        }
    }
}

/// Missing or non-string fields default to the empty string
fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Accepts JSON numbers and numeric strings; anything else is `None`
fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn numeric_field(value: &Value, key: &str) -> f64 {
    value.get(key).and_then(numeric_value).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_action_labels() {
        assert_eq!(Action::parse("SWAP"), Action::Swap);
        assert_eq!(Action::parse("bridge"), Action::Bridge);
        assert_eq!(Action::parse("BRIDGE ASSETS"), Action::Bridge);
        assert_eq!(Action::parse("TRANSFER"), Action::Transfer);
        assert_eq!(Action::parse("send"), Action::Transfer);
        assert_eq!(Action::parse("stake"), Action::Unknown);
        assert_eq!(Action::parse(""), Action::Unknown);
    }

    #[test]
    fn token_out_defaults_to_token_in() {
        let value = json!({
            "action": "BRIDGE",
            "source_chain": "SEPOLIA",
            "target_chain": "SUI NET",
            "token_in": "USDC",
            "amount": "100"
        });

        let intent = Intent::from_completion(&value, "Bridge 100 USDC to Sui");
        assert_eq!(intent.token_out, "USDC");
        assert_eq!(intent.pair(), "USDC/USDC");
    }

    #[test]
    fn amount_accepts_numbers_and_numeric_strings() {
        let number = json!({ "action": "SWAP", "amount": 1.5 });
        assert_eq!(Intent::from_completion(&number, "x").amount, 1.5);

        let string = json!({ "action": "SWAP", "amount": "0.01" });
        assert_eq!(Intent::from_completion(&string, "x").amount, 0.01);

        let garbage = json!({ "action": "SWAP", "amount": "lots" });
        assert_eq!(Intent::from_completion(&garbage, "x").amount, 0.0);

        let missing = json!({ "action": "SWAP" });
        assert_eq!(Intent::from_completion(&missing, "x").amount, 0.0);
    }

    #[test]
    fn negative_amounts_clamp_to_zero() {
        let value = json!({ "action": "SWAP", "amount": -3.0 });
        assert_eq!(Intent::from_completion(&value, "x").amount, 0.0);
    }

    #[test]
    fn recipient_falls_back_to_user_address() {
        let value = json!({ "action": "TRANSFER", "user_address": "vitalik.eth" });
        let intent = Intent::from_completion(&value, "x");
        assert_eq!(intent.recipient.as_deref(), Some("vitalik.eth"));

        let empty = json!({ "action": "TRANSFER", "recipient": "" });
        assert_eq!(Intent::from_completion(&empty, "x").recipient, None);
    }

    #[test]
    fn same_chain_check_ignores_case() {
        let intent = Intent {
            source_chain: "Sepolia".to_string(),
            target_chain: "SEPOLIA".to_string(),
            ..Default::default()
        };
        assert!(intent.is_same_chain());
    }

    #[test]
    fn statuses_serialize_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&ExecutionStatus::UnknownAction).unwrap(),
            "\"UNKNOWN_ACTION\""
        );
        assert_eq!(
            serde_json::to_string(&Action::Bridge).unwrap(),
            "\"BRIDGE\""
        );
    }

    #[test]
    fn fallback_keeps_original_text() {
        let intent = Intent::fallback("do the thing");
        assert_eq!(intent.action, Action::Unknown);
        assert_eq!(intent.original_text, "do the thing");
        assert_eq!(intent.amount, 0.0);
    }
}
