use crate::{code, error::ApiError, store::LinkMap, AppState};
use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How many generated codes to try before reporting a collision.
const MAX_GENERATE_ATTEMPTS: usize = 10;

// ── Request / response types ───────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    url: Option<String>,
    #[serde(rename = "shortCode")]
    short_code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    #[serde(rename = "shortenedUrl")]
    pub shortened_url: String,
}

// ── Handlers ───────────────────────────────────────────────────────────────

/// GET /links
/// Every stored mapping as a flat JSON object (`{}` when empty).
pub async fn list_links(State(state): State<Arc<AppState>>) -> Result<Json<LinkMap>, ApiError> {
    match state.store.load_links().await {
        Ok(links) => Ok(Json(links)),
        Err(e) => {
            tracing::error!("Failed to load links: {}", e);
            Err(ApiError::LinksUnavailable)
        }
    }
}

/// POST /shorten
///
/// The body is parsed by hand rather than with the `Json` extractor so that
/// any malformed payload maps to the same 500 `Failed to shorten URL`.
pub async fn shorten(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<ShortenResponse>, ApiError> {
    let request: ShortenRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!("Rejecting malformed shorten body: {}", e);
        ApiError::ShortenFailed
    })?;

    let url = request
        .url
        .filter(|s| !s.is_empty())
        .ok_or(ApiError::MissingUrl)?;

    let requested_code = request.short_code.filter(|s| !s.is_empty());

    // Hold the write lock across load -> check -> save.
    let _guard = state.store.lock_writes().await;

    let mut links = state.store.load_links().await.map_err(|e| {
        tracing::error!("Failed to load links before shortening: {}", e);
        ApiError::ShortenFailed
    })?;

    let short_code = match requested_code {
        Some(code) if links.contains_key(&code) => {
            tracing::info!("Short code '{}' is already taken", code);
            return Err(ApiError::DuplicateCode);
        }
        Some(code) => code,
        None => generate_unused_code(&links).ok_or(ApiError::DuplicateCode)?,
    };

    links.insert(short_code.clone(), url);

    state.store.save_links(&links).await.map_err(|e| {
        tracing::error!("Failed to persist link '{}': {}", short_code, e);
        ApiError::ShortenFailed
    })?;

    Ok(Json(ShortenResponse {
        shortened_url: format!("{}/{}", state.config.base_url, short_code),
    }))
}

// ── Private helpers ────────────────────────────────────────────────────────

/// Generate a code not present in `links`. Gives up after a few attempts.
fn generate_unused_code(links: &LinkMap) -> Option<String> {
    (0..MAX_GENERATE_ATTEMPTS)
        .map(|_| code::generate())
        .find(|candidate| !links.contains_key(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_code_avoids_existing_keys() {
        let mut links = LinkMap::new();
        links.insert("taken1".into(), "https://a.com".into());

        let code = generate_unused_code(&links).unwrap();
        assert!(!links.contains_key(&code));
        assert!(code::is_generated_shape(&code));
    }

    #[test]
    fn request_fields_are_optional() {
        let request: ShortenRequest = serde_json::from_str("{}").unwrap();
        assert!(request.url.is_none());
        assert!(request.short_code.is_none());

        let request: ShortenRequest =
            serde_json::from_str(r#"{"url":"https://a.com","shortCode":null}"#).unwrap();
        assert_eq!(request.url.as_deref(), Some("https://a.com"));
        assert!(request.short_code.is_none());
    }

    #[test]
    fn response_uses_camel_case_field() {
        let body = serde_json::to_value(ShortenResponse {
            shortened_url: "http://localhost:3000/ex1".into(),
        })
        .unwrap();
        assert_eq!(body["shortenedUrl"], "http://localhost:3000/ex1");
    }
}
