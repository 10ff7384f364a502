//! HTTP server for the portfolio site.
//!
//! Serves the static site and the small JSON API its page script uses.
//! Files are read on every request, so editing `art/images.csv` shows up on
//! the next reload.
//!
//! # API Endpoints
//!
//! | Method | Path                 | Description                          |
//! |--------|----------------------|--------------------------------------|
//! | GET    | `/health`            | Health check                         |
//! | GET    | `/api/gallery`       | Parsed manifest with image paths     |
//! | GET    | `/api/last-modified` | "Last updated" date text             |
//! | GET    | `/api/contact`       | Contact address and mailto link      |
//! | GET    | `/api/logs`          | SSE stream for real-time logs        |
//! | GET    | anything else        | Static files from the site root      |
//!
//! Dotfiles (`.env`, `.git/`), the raw `images.txt` listing and builder temp
//! files are never served; they answer 404 like a missing file.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::get,
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

use super::logs::{log_error, log_info, log_info_indent, log_warning, LOG_BROADCASTER};
use super::types::{error_response, GalleryResponse};
use crate::config::{SiteConfig, MANIFEST_SOURCE_FILE};
use crate::error::{ServerError, ServerResult};
use crate::parser::load_manifest;
use crate::site::read_last_modified;

type AppState = Arc<SiteConfig>;

type ApiError = (StatusCode, Json<Value>);

impl ServerError {
    fn into_api_error(self) -> ApiError {
        let status = if self.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        log_error(self.to_string());
        (status, Json(error_response(&self.to_string())))
    }
}

/// Whether a request path points at a file the site must not expose.
pub fn is_private_path(path: &str) -> bool {
    path.split('/').filter(|segment| !segment.is_empty()).any(|segment| {
        segment.starts_with('.')
            || segment.eq_ignore_ascii_case(MANIFEST_SOURCE_FILE)
            || segment.ends_with("_temp.csv")
    })
}

/// Answer 404 for private paths before they reach the file service.
async fn hide_private_files(request: Request, next: Next) -> Response {
    if is_private_path(request.uri().path()) {
        log_warning(format!("Refused private path: {}", request.uri().path()));
        return (StatusCode::NOT_FOUND, Json(error_response("Not found"))).into_response();
    }
    next.run(request).await
}

/// Build the router. Split out from [`start_server`] for tests.
pub fn router(config: SiteConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let static_files = ServeDir::new(&config.site_root);

    Router::new()
        .route("/health", get(health))
        .route("/api/gallery", get(gallery))
        .route("/api/last-modified", get(last_modified))
        .route("/api/contact", get(contact))
        .route("/api/logs", get(sse_logs))
        .fallback_service(static_files)
        .layer(middleware::from_fn(hide_private_files))
        .layer(cors)
        .with_state(Arc::new(config))
}

/// Start the HTTP server
pub async fn start_server(port: u16, config: SiteConfig) -> ServerResult<()> {
    let root = config.site_root.display().to_string();
    let app = router(config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    log_info(format!("🚀 Gallery server running on http://localhost:{}", port));
    log_info_indent(format!("Site root: {}", root), 1);
    log_info_indent("GET /api/gallery       - Parsed manifest", 1);
    log_info_indent("GET /api/last-modified - Last updated date", 1);
    log_info_indent("GET /api/contact       - Contact address", 1);
    log_info_indent("GET /api/logs          - SSE log stream", 1);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Health check endpoint
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "gallery",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "gallery": "GET /api/gallery",
            "lastModified": "GET /api/last-modified",
            "contact": "GET /api/contact",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// Parse the manifest from disk
async fn gallery(State(config): State<AppState>) -> Result<Json<GalleryResponse>, ApiError> {
    let path = config.manifest_path();
    let outcome = load_manifest(&path).map_err(|e| ServerError::from(e).into_api_error())?;

    if outcome.is_empty() {
        log_warning("No valid image data found in manifest");
    }

    Ok(Json(GalleryResponse::from_outcome(outcome, &config.art_dir)))
}

/// Last updated date, never cached
async fn last_modified(State(config): State<AppState>) -> Result<Response, ApiError> {
    let date = read_last_modified(&config.last_modified_path())
        .map_err(|e| ServerError::from(e).into_api_error())?;

    let mut response = Json(json!({ "lastModified": date })).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    Ok(response)
}

async fn contact(State(config): State<AppState>) -> Json<Value> {
    Json(json!({
        "address": config.contact.address(),
        "mailto": config.contact.mailto(),
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| {
        let entry = result.ok()?;
        let json = serde_json::to_string(&entry).ok()?;
        Some(Ok(Event::default().data(json)))
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}
