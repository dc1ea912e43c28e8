//! Cross-chain intent agent CLI
//!
//! Command-line interface for serving the HTTP API and for resolving or
//! executing commands one-off from the terminal.

use clap::{Parser, Subcommand};
use crosschain_intent_agent::llm::DeepSeekClient;
use crosschain_intent_agent::providers::{
    CircleCctpProvider, LifiQuoteProvider, YellowClearingProvider,
};
use crosschain_intent_agent::server::{serve, AppState};
use crosschain_intent_agent::{Config, ExecutionOrchestrator, IntentResolver, Result};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "intent-agent")]
#[command(about = "AI-powered cross-chain intent agent")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the HTTP API
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Resolve a command into a structured intent and print it
    Resolve {
        /// Free-text command, e.g. "bridge 100 USDC from Sui to Ethereum"
        text: String,
    },

    /// Resolve a command and execute it end to end
    Execute {
        /// Free-text command
        text: String,
    },

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore if not found)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let mut config = Config::from_env()?;

    match cli.command {
        Commands::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            run_server(config).await?;
        }
        Commands::Resolve { text } => {
            let resolver = build_resolver(&config)?;
            let intent = resolver.resolve(&text).await?;
            println!("{}", serde_json::to_string_pretty(&intent)?);
        }
        Commands::Execute { text } => {
            let resolver = build_resolver(&config)?;
            let orchestrator = build_orchestrator()?;
            let intent = resolver.resolve(&text).await?;
            let result = orchestrator.execute(&intent).await;
            let combined = serde_json::json!({
                "intent": intent,
                "result": result,
            });
            println!("{}", serde_json::to_string_pretty(&combined)?);
        }
        Commands::Config => {
            println!("{:#?}", config);
        }
    }

    Ok(())
}

fn build_resolver(config: &Config) -> Result<IntentResolver> {
    let completion = Arc::new(DeepSeekClient::new(config.completion.clone())?);
    Ok(IntentResolver::new(completion))
}

fn build_orchestrator() -> Result<ExecutionOrchestrator> {
    let quote = Arc::new(LifiQuoteProvider::new()?);
    let liquidity = Arc::new(YellowClearingProvider::new());
    let settlement = Arc::new(CircleCctpProvider::new());
    Ok(ExecutionOrchestrator::new(quote, liquidity, settlement))
}

async fn run_server(config: Config) -> Result<()> {
    let state = AppState {
        resolver: Arc::new(build_resolver(&config)?),
        orchestrator: Arc::new(build_orchestrator()?),
        app_name: config.app_name.clone(),
    };

    tracing::info!(port = config.port, app = %config.app_name, "Starting API server");
    serve(&config, state).await
}
