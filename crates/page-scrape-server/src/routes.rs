//! HTTP routes over the scrape artifact.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use page_scrape::types::now_iso;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};

use crate::data::{is_failure, load_scraped_data};

const ENDPOINTS: [&str; 4] = ["/", "/raw", "/health", "/info"];

/// Shared server state passed to all handlers via axum State.
pub struct AppState {
    pub data_file: PathBuf,
}

/// Build the axum Router with all endpoints.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(home))
        .route("/raw", get(raw))
        .route("/health", get(health))
        .route("/info", get(info))
        .fallback(not_found)
        .layer(cors)
        .with_state(state)
}

/// Run the HTTP server on the given address.
pub async fn serve(addr: &str, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}

/// Scraped data wrapped with status and server metadata.
async fn home(State(state): State<Arc<AppState>>) -> Response {
    match load_scraped_data(&state.data_file) {
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "status": "error",
                "error": e.to_string(),
                "message": "Failed to load scraped data",
                "timestamp": now_iso(),
            })),
        )
            .into_response(),
        Ok(data) if is_failure(&data) => {
            let message = data
                .get("errorMessage")
                .cloned()
                .unwrap_or_else(|| json!("Unknown error"));
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "status": "scraping_failed",
                    "error": message,
                    "details": data,
                    "timestamp": now_iso(),
                })),
            )
                .into_response()
        }
        Ok(data) => Json(json!({
            "status": "success",
            "message": "Data retrieved successfully",
            "data": data,
            "server_info": {
                "server_time": now_iso(),
                "data_source": state.data_file.display().to_string(),
            },
        }))
        .into_response(),
    }
}

/// The record exactly as stored, success or failure.
async fn raw(State(state): State<Arc<AppState>>) -> Response {
    match load_scraped_data(&state.data_file) {
        Ok(data) => Json(data).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}

async fn health(State(state): State<Arc<AppState>>) -> Response {
    let loaded = load_scraped_data(&state.data_file);
    let mut body = json!({
        "status": "healthy",
        "timestamp": now_iso(),
        "data_file_exists": state.data_file.exists(),
        "data_loadable": loaded.is_ok(),
    });

    match loaded {
        Ok(_) => Json(body).into_response(),
        Err(e) => {
            body["status"] = json!("degraded");
            body["warning"] = json!(e.to_string());
            (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response()
        }
    }
}

async fn info() -> Json<Value> {
    Json(json!({
        "api_name": "Web Scraper API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "/": "Get scraped data with metadata",
            "/raw": "Get raw scraped data",
            "/health": "Health check endpoint",
            "/info": "API information",
        },
        "timestamp": now_iso(),
    }))
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Endpoint not found",
            "message": "The requested endpoint does not exist",
            "available_endpoints": ENDPOINTS,
            "timestamp": now_iso(),
        })),
    )
        .into_response()
}
