//! Static file serving.
//!
//! Stylesheets, images and pre-generated pages (such as the Reference Manual)
//! are served from the assets directory with tower-http's `ServeDir`. Page
//! source files living alongside them are never served raw.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tower::ServiceExt;

use crate::state::AppState;

/// Fallback handler for requests no page route claims.
pub(crate) async fn fallback(State(state): State<Arc<AppState>>, request: Request) -> Response {
    serve_asset(&state, request).await
}

/// Serve a request from the assets directory.
pub(crate) async fn serve_asset(state: &AppState, request: Request) -> Response {
    let path = request.uri().path();
    let file_name = path.rsplit('/').next().unwrap_or_default();
    if state.is_fragment_file(file_name) {
        tracing::debug!(path, "Refusing to serve page source");
        return StatusCode::NOT_FOUND.into_response();
    }

    tracing::trace!(path, "Serving static asset");
    match state.assets.clone().oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}
