use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub mod code;
pub mod config;
pub mod error;
pub mod handlers;
pub mod store;

use config::AppConfig;
use store::LinkStore;

// ── Shared application state ───────────────────────────────────────────────

pub struct AppState {
    pub config: AppConfig,
    /// Re-read from disk on every request that needs the links.
    pub store: LinkStore,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = LinkStore::from_config(&config);
        Self { config, store }
    }
}

// ── Router ─────────────────────────────────────────────────────────────────

/// Build the application router.
///
/// Anything not matched below (including GET /shorten) is treated as a
/// short-code lookup by the fallback.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Front-end assets
        .route("/", get(handlers::assets::index))
        .route("/index.html", get(handlers::assets::index))
        .route("/style.css", get(handlers::assets::stylesheet))
        .route("/script.js", get(handlers::assets::script))
        // JSON API
        .route("/links", get(handlers::api::list_links))
        .route(
            "/shorten",
            post(handlers::api::shorten).get(handlers::redirect::redirect),
        )
        // Short-link redirect for every other path
        .fallback(handlers::redirect::redirect)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
