//! HTTP surface for the agent
//!
//! Thin boundary: decode the inbound text, run the resolver, then the
//! orchestrator, and serialize the combined payload. Orchestration
//! failures are already folded into the execution record, so the only
//! error statuses mapped here belong to the resolver.

use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use crate::config::Config;
use crate::intent::{ExecutionResult, Intent};
use crate::orchestrator::ExecutionOrchestrator;
use crate::resolver::IntentResolver;
use crate::Error;

/// Shared application state, constructed once at startup and cloned per
/// request (all handles are `Arc`s)
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<IntentResolver>,
    pub orchestrator: Arc<ExecutionOrchestrator>,
    pub app_name: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub status: &'static str,
    pub intent: Intent,
    pub result: ExecutionResult,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

/// Liveness probe response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: String,
    version: &'static str,
}

/// Build the API router with CORS and request logging applied
pub fn router(state: AppState, allowed_origin: &str) -> crate::Result<Router> {
    let origin = allowed_origin
        .parse::<HeaderValue>()
        .map_err(|e| Error::Config(format!("invalid allowed origin: {}", e)))?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::ORIGIN, header::CONTENT_TYPE, header::ACCEPT]);

    Ok(Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/chat", post(chat))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Bind the configured port and serve the API until shutdown
pub async fn serve(config: &Config, state: AppState) -> crate::Result<()> {
    let app = router(state, &config.allowed_origin)?;
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(addr = %addr, app = %config.app_name, "API listening");
    axum::serve(listener, app).await?;

    Ok(())
}

/// GET /api/v1/health - liveness only, no side effects
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "active",
        service: state.app_name.clone(),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /api/v1/chat - resolve the inbound text and execute the intent.
///
/// `UNKNOWN_ACTION` and same-chain-skip outcomes are successes, not
/// errors: any request that passes validation gets a 200 with a
/// well-formed execution record.
async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    error: format!("Invalid request body: {}", rejection),
                }),
            )
                .into_response();
        }
    };

    let intent = match state.resolver.resolve(&request.text).await {
        Ok(intent) => intent,
        Err(Error::NullCommand) => {
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    error: "Could not understand command. Try saying: 'Move USDC from Sui to Ethereum'".to_string(),
                }),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Intent resolution failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Analysis failed: {}", e),
                }),
            )
                .into_response();
        }
    };

    let result = state.orchestrator.execute(&intent).await;

    (
        StatusCode::OK,
        Json(ChatResponse {
            status: "success",
            intent,
            result,
        }),
    )
        .into_response()
}
