//! HTTP server for topodoc pages.
//!
//! This crate serves the documentation site with axum:
//! - Composed pages for `/{section}/{page}.html` when the section has a
//!   matching content fragment
//! - Static files (stylesheets, images, generated reference pages) from the
//!   assets directory for everything else
//!
//! # Quick Start
//!
//! ```ignore
//! use std::path::PathBuf;
//! use topodoc_server::{ServerConfig, run_server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig {
//!         source_dir: PathBuf::from("doc"),
//!         assets_dir: PathBuf::from("doc"),
//!         ..Default::default()
//!     };
//!
//!     run_server(config).await.unwrap();
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! Browser ──HTTP──► axum router (topodoc-server)
//!                        │
//!                        ├─► /{section}/{page}.html ──► PageComposer ──► FsStore
//!                        │
//!                        └─► everything else ──► tower-http ServeDir (assets_dir)
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;
mod static_files;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use topodoc_page::{ComposerOptions, PageComposer};
use topodoc_storage::{ContentStore, FsStore};
use tower_http::services::ServeDir;

use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Fragment tree root.
    pub source_dir: PathBuf,
    /// Static asset directory.
    pub assets_dir: PathBuf,
    /// Suffix mapping page names to fragments.
    pub fragment_suffix: String,
    /// Color scheme name.
    pub color_scheme: String,
    /// Document title.
    pub title: String,
    /// Stylesheet href.
    pub stylesheet: String,
    /// Enable verbose output.
    pub verbose: bool,
    /// Application version (for cache invalidation).
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let options = ComposerOptions::default();
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            source_dir: PathBuf::from("doc"),
            assets_dir: PathBuf::from("doc"),
            fragment_suffix: "_text.php".to_owned(),
            color_scheme: topodoc_config::DEFAULT_SCHEME.to_owned(),
            title: options.title,
            stylesheet: options.stylesheet,
            verbose: false,
            version: String::new(),
        }
    }
}

/// Run the server.
///
/// # Arguments
///
/// * `config` - Server configuration
///
/// # Errors
///
/// Returns an error if the color scheme is unknown or the server fails to start.
pub async fn run_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let store: Arc<dyn ContentStore> = Arc::new(FsStore::new(config.source_dir.clone()));
    let composer = PageComposer::from_scheme_name(
        &config.color_scheme,
        store,
        ComposerOptions {
            title: config.title.clone(),
            stylesheet: config.stylesheet.clone(),
        },
    )?;

    let state = Arc::new(AppState {
        composer,
        fragment_suffix: config.fragment_suffix.clone(),
        assets: ServeDir::new(&config.assets_dir),
        verbose: config.verbose,
        version: config.version.clone(),
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(
        address = %addr,
        source_dir = %config.source_dir.display(),
        scheme = %config.color_scheme,
        "Starting server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}

/// Create server configuration from topodoc config.
///
/// # Arguments
///
/// * `config` - topodoc configuration
/// * `version` - Application version
/// * `verbose` - Enable verbose output
#[must_use]
pub fn server_config_from_config(
    config: &topodoc_config::Config,
    version: String,
    verbose: bool,
) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        source_dir: config.content_resolved.source_dir.clone(),
        assets_dir: config.content_resolved.assets_dir.clone(),
        fragment_suffix: config.content_resolved.fragment_suffix.clone(),
        color_scheme: config.site.color_scheme.clone(),
        title: config.site.title.clone(),
        stylesheet: config.site.stylesheet.clone(),
        verbose,
        version,
    }
}
