use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failures of the file-backed link store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("links file {path} is not a valid JSON object: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode links: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors returned from the JSON API. The `Display` text is what ends up in
/// the `{"error": ...}` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("URL is required")]
    MissingUrl,

    #[error("Short code already exists")]
    DuplicateCode,

    #[error("Link not found")]
    LinkNotFound,

    #[error("Failed to shorten URL")]
    ShortenFailed,

    #[error("Failed to retrieve links")]
    LinksUnavailable,

    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingUrl | ApiError::DuplicateCode => StatusCode::BAD_REQUEST,
            ApiError::LinkNotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::ShortenFailed | ApiError::LinksUnavailable => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_400() {
        assert_eq!(ApiError::MissingUrl.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::DuplicateCode.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn store_faults_are_500() {
        assert_eq!(
            ApiError::ShortenFailed.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::LinksUnavailable.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn messages_match_the_wire_format() {
        assert_eq!(ApiError::MissingUrl.to_string(), "URL is required");
        assert_eq!(ApiError::DuplicateCode.to_string(), "Short code already exists");
        assert_eq!(ApiError::LinkNotFound.to_string(), "Link not found");
        assert_eq!(ApiError::ShortenFailed.to_string(), "Failed to shorten URL");
    }
}
