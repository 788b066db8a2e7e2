//! `topodoc serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use topodoc_config::{CliSettings, Config};
use topodoc_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover topodoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fragment source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Color scheme: parchment or modern (overrides config).
    #[arg(long, env = "TOPODOC_SCHEME")]
    scheme: Option<String>,

    /// Enable verbose output (show page warnings and request logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            source_dir: self.source_dir,
            color_scheme: self.scheme,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let content = &config.content_resolved;
        let address = format!("{}:{}", config.server.host, config.server.port);
        output.field("Listening on", &format!("http://{address}"));
        output.field("Source", &content.source_dir.display().to_string());
        if content.assets_dir != content.source_dir {
            output.field("Assets", &content.assets_dir.display().to_string());
        }
        output.field("Color scheme", &config.site.color_scheme);
        tracing::info!(
            %address,
            source_dir = %content.source_dir.display(),
            scheme = %config.site.color_scheme,
            "Configuration loaded"
        );

        let server_config = server_config_from_config(&config, version.to_owned(), self.verbose);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
