//! Configuration for the cross-chain intent agent

use secrecy::SecretString;
use url::Url;

use crate::{Error, Result};

/// HTTP port environment variable name
pub const PORT_ENV: &str = "PORT";
/// Application name environment variable name
pub const APP_NAME_ENV: &str = "APP_NAME";
/// CORS allowed-origin environment variable name
pub const ALLOWED_ORIGIN_ENV: &str = "ALLOWED_ORIGIN";
/// Completion API key environment variable name
pub const DEEPSEEK_API_KEY_ENV: &str = "DEEPSEEK_API_KEY";
/// Completion base URL environment variable name
pub const DEEPSEEK_BASE_URL_ENV: &str = "DEEPSEEK_BASE_URL";
/// Completion model environment variable name
pub const DEEPSEEK_MODEL_ENV: &str = "DEEPSEEK_MODEL";

/// Chains the agent knows how to route between
pub const SUPPORTED_CHAINS: [&str; 3] = ["SEPOLIA", "SUI NET", "ETHEREUM"];

/// Tokens the agent accepts in commands
pub const SUPPORTED_TOKENS: [&str; 3] = ["USDC", "ETH", "SUI"];

/// Normalize a free-form chain label against the known chain set.
///
/// Uppercases the label and folds known aliases. Unrecognized labels are
/// kept uppercased rather than rejected: chain fields stay free-form.
pub fn normalize_chain(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();
    match upper.as_str() {
        "SUI" => "SUI NET".to_string(),
        "ETH" | "ETHEREUM MAINNET" => "ETHEREUM".to_string(),
        _ => upper,
    }
}

/// Settings for the external completion capability
///
/// The backend is any OpenAI-compatible chat-completions endpoint;
/// DeepSeek is the default.
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    /// Base URL of the completion API
    pub base_url: Url,
    /// Model identifier sent with every request
    pub model: String,
    /// Bearer token; never logged
    pub api_key: SecretString,
}

impl CompletionConfig {
    /// Read completion settings from the process environment
    pub fn from_env() -> Result<Self> {
        let raw_url = env_or(DEEPSEEK_BASE_URL_ENV, "https://api.deepseek.com");
        let base_url = Url::parse(&raw_url)
            .map_err(|e| Error::Config(format!("invalid {}: {}", DEEPSEEK_BASE_URL_ENV, e)))?;
        let api_key = SecretString::from(std::env::var(DEEPSEEK_API_KEY_ENV).unwrap_or_default());

        Ok(Self {
            base_url,
            model: env_or(DEEPSEEK_MODEL_ENV, "deepseek-chat"),
            api_key,
        })
    }
}

/// Main configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// TCP port for the HTTP API
    pub port: u16,
    /// Application name, used in logs and the health endpoint
    pub app_name: String,
    /// Origin allowed to call the API cross-origin
    pub allowed_origin: String,
    /// Completion capability settings
    pub completion: CompletionConfig,
}

impl Config {
    /// Read configuration from the process environment.
    ///
    /// `main` loads an optional `.env` file first; a missing file falls
    /// back silently to process environment variables, and absent
    /// variables fall back to the defaults below.
    pub fn from_env() -> Result<Self> {
        let port = env_or(PORT_ENV, "8080")
            .parse::<u16>()
            .map_err(|e| Error::Config(format!("invalid {}: {}", PORT_ENV, e)))?;

        Ok(Self {
            port,
            app_name: env_or(APP_NAME_ENV, "crosschain-intent-agent"),
            allowed_origin: env_or(ALLOWED_ORIGIN_ENV, "http://localhost:3000"),
            completion: CompletionConfig::from_env()?,
        })
    }
}

/// Read an environment variable with a fallback
fn env_or(key: &str, fallback: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| fallback.to_string())
}
