//! HTTP server for the liftdex API.
//!
//! # API Endpoints
//!
//! | Method | Path           | Description                               |
//! |--------|----------------|-------------------------------------------|
//! | GET    | `/health`      | Health check                              |
//! | POST   | `/api/catalog` | Parse catalog text, return grouped view   |
//! | GET    | `/api/logs`    | SSE stream for real-time logs             |
//!
//! `POST /api/catalog` takes the raw catalog as the request body. An
//! optional `order=Chest,Legs` query parameter overrides the configured
//! group order for that request.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde::Deserialize;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::{log_error, log_info, LOG_BROADCASTER};
use super::types::{error_response, CatalogResponse};
use crate::config::{parse_group_list, Settings};
use crate::error::{LoadError, PipelineError, ServerError, ServerResult};
use crate::transform::pipeline::{load_bytes, CatalogOptions};

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(settings),
        }
    }
}

/// Query parameters of `POST /api/catalog`
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    /// Comma-separated group order
    pub order: Option<String>,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::Pipeline(PipelineError::Format(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::Pipeline(PipelineError::Load(LoadError::Io(_))) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ServerError::Pipeline(PipelineError::Load(_)) | ServerError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
        };
        (status, Json(error_response(&self.to_string()))).into_response()
    }
}

/// Build the application router
pub fn router(settings: Settings) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/catalog", post(post_catalog))
        .route("/api/logs", get(sse_logs))
        .layer(cors)
        .with_state(AppState::new(settings))
}

/// Start the HTTP server
pub async fn start_server(settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    log_info(format!("🚀 Liftdex server running on http://localhost:{}", settings.port));
    log_info("POST /api/catalog - Parse and group a catalog");
    log_info("GET  /api/logs    - SSE log stream");
    log_info("GET  /health      - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(settings)).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "liftdex",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "catalog": "POST /api/catalog",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Catalog endpoint
async fn post_catalog(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
    body: Bytes,
) -> ServerResult<Json<CatalogResponse>> {
    let group_order = match query.order.as_deref().map(parse_group_list) {
        Some(groups) if !groups.is_empty() => groups,
        Some(_) => {
            return Err(ServerError::BadRequest(
                "order must name at least one group".to_string(),
            ))
        }
        None => state.settings.group_order.clone(),
    };

    let options = CatalogOptions {
        group_order,
        drop_untargeted: false,
    };

    let result = load_bytes(&body, &options).map_err(|e| {
        log_error(format!("Catalog rejected: {}", e));
        ServerError::from(e)
    })?;

    Ok(Json(CatalogResponse::from(result)))
}
