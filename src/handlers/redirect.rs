use crate::{error::ApiError, AppState};
use axum::{
    extract::State,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// GET /:code, and every other path no route claims.
///
/// The whole path minus its leading slash is the short code, so unknown
/// paths such as `/favicon.ico` end up here and get a JSON 404.
///
/// 1. Re-read the links file (no cache between requests).
/// 2. Return a 302 to the stored URL, or 404 if the code is unknown.
pub async fn redirect(State(state): State<Arc<AppState>>, method: Method, uri: Uri) -> Response {
    if method != Method::GET && method != Method::HEAD {
        return ApiError::MethodNotAllowed.into_response();
    }

    let path = uri.path();
    let code = path.strip_prefix('/').unwrap_or(path);

    let links = match state.store.load_links().await {
        Ok(links) => links,
        Err(e) => {
            tracing::error!("Failed to load links while resolving '{}': {}", code, e);
            return ApiError::LinksUnavailable.into_response();
        }
    };

    match links.get(code) {
        Some(original_url) => {
            tracing::debug!("Redirecting '{}' -> {}", code, original_url);
            found(original_url)
        }
        None => ApiError::LinkNotFound.into_response(),
    }
}

// ── Helpers ────────────────────────────────────────────────────────────────

/// A bare 302. `axum::response::Redirect` only offers 303/307/308.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_owned())]).into_response()
}
