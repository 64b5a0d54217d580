use crate::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use std::{path::Path, sync::Arc};

/// GET / and GET /index.html
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    serve(&state, "index.html").await
}

/// GET /style.css
pub async fn stylesheet(State(state): State<Arc<AppState>>) -> Response {
    serve(&state, "style.css").await
}

/// GET /script.js
pub async fn script(State(state): State<Arc<AppState>>) -> Response {
    serve(&state, "script.js").await
}

/// Read `file_name` from the static directory and return it with a content
/// type derived from its extension.
async fn serve(state: &AppState, file_name: &str) -> Response {
    let path = state.config.static_dir.join(file_name);

    match tokio::fs::read(&path).await {
        Ok(data) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, content_type(&path))],
            data,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to read static file {}: {}", path.display(), e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                [(header::CONTENT_TYPE, "text/plain")],
                "Error loading file",
            )
                .into_response()
        }
    }
}

pub fn content_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("css") => "text/css",
        Some("js") => "text/javascript",
        _ => "text/html",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_type_by_extension() {
        assert_eq!(content_type(Path::new("public/style.css")), "text/css");
        assert_eq!(content_type(Path::new("public/script.js")), "text/javascript");
        assert_eq!(content_type(Path::new("public/index.html")), "text/html");
        assert_eq!(content_type(Path::new("README")), "text/html");
    }
}
