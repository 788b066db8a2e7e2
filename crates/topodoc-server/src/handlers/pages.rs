//! Page endpoints.
//!
//! Composes `/{section}/{page}.html` from the section's `<page><suffix>`
//! fragment and returns the full HTML document.

use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Redirect, Response};
use md5::{Digest, Md5};
use topodoc_page::{ROOT_SECTION, RequestContext};

use crate::error::ServerError;
use crate::state::AppState;
use crate::static_files::serve_asset;

/// Handle GET / and GET /index.html.
pub(crate) async fn redirect_home() -> Redirect {
    Redirect::temporary(&format!("/{ROOT_SECTION}/index.html"))
}

/// Handle GET /{section}/.
pub(crate) async fn redirect_section_index(Path(section): Path<String>) -> Redirect {
    Redirect::temporary(&format!("/{section}/index.html"))
}

/// Handle GET /{section}/{page}.
///
/// Falls back to the assets directory when the request is not for an `.html`
/// page or the section has no fragment for it.
pub(crate) async fn get_page(
    State(state): State<Arc<AppState>>,
    Path((section, page)): Path<(String, String)>,
    request: Request,
) -> Result<Response, ServerError> {
    let Some(name) = page.strip_suffix(".html") else {
        return Ok(serve_asset(&state, request).await);
    };

    let fragment = state.fragment_for(name);
    if !state.composer.store().exists(&section, &fragment) {
        return Ok(serve_asset(&state, request).await);
    }

    render_page(&state, &section, &fragment, request.headers())
}

/// Compose a page and build the response.
fn render_page(
    state: &AppState,
    section: &str,
    fragment: &str,
    headers: &HeaderMap,
) -> Result<Response, ServerError> {
    let context = RequestContext::new(format!("/{section}"));
    let page = state.composer.compose_page(&context, fragment)?;

    // Log warnings in verbose mode
    if state.verbose {
        for warning in &page.warnings {
            tracing::warn!(section, fragment, warning = %warning, "Page composition warning");
        }
    }

    let etag = compute_etag(&state.version, &page.html);

    // Check If-None-Match header for conditional request
    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok(StatusCode::NOT_MODIFIED.into_response());
    }

    Ok((
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8".to_owned()),
            (header::ETAG, etag),
            (header::CACHE_CONTROL, "private, max-age=60".to_owned()),
        ],
        page.html,
    )
        .into_response())
}

/// Compute `ETag` from version and content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}
