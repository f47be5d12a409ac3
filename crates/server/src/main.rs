use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use shared::{
    error::{ApiError, SummarizeRejection},
    protocol::{SummarizeRequest, SummarizeResponse, SUMMARIZE_ROUTE},
};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod config;
mod summarizer;

use config::load_settings;
use summarizer::LeadSummarizer;

const MAX_REQUEST_BYTES: usize = 1024 * 1024;

struct AppState {
    summarizer: LeadSummarizer,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let state = AppState {
        summarizer: LeadSummarizer::new(settings.max_summary_words, settings.max_input_chars),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(
        %addr,
        max_summary_words = settings.max_summary_words,
        max_input_chars = settings.max_input_chars,
        "summarization service listening"
    );
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(SUMMARIZE_ROUTE, post(summarize))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BYTES))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, (StatusCode, Json<ApiError>)> {
    let summary = state.summarizer.summarize(&req.text).map_err(|e| {
        let status = match e {
            SummarizeRejection::EmptyText => StatusCode::BAD_REQUEST,
            SummarizeRejection::NoWords => StatusCode::UNPROCESSABLE_ENTITY,
        };
        (status, Json(ApiError::from(e)))
    })?;

    debug!(
        input_chars = req.text.chars().count(),
        summary_chars = summary.chars().count(),
        "summary generated"
    );
    Ok(Json(SummarizeResponse::new(summary)))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
