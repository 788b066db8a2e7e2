//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// # Arguments
///
/// * `state` - Shared application state
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let page_routes = Router::new()
        .route("/", get(handlers::pages::redirect_home))
        .route("/index.html", get(handlers::pages::redirect_home))
        .route("/{section}/", get(handlers::pages::redirect_section_index))
        .route("/{section}/{page}", get(handlers::pages::get_page));

    Router::new()
        .merge(page_routes)
        // Stylesheets, images and anything deeper than one section level
        .fallback(static_files::fallback)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(security::content_type_options_layer())
                .layer(security::frame_options_layer()),
        )
        .with_state(state)
}
