//! `topodoc build` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use topodoc_config::{CliSettings, Config};
use topodoc_page::{BuildConfig, BuildReport, ComposerOptions, PageComposer, StaticSiteBuilder};
use topodoc_storage::{ContentStore, FsStore};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover topodoc.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fragment source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Color scheme: parchment or modern (overrides config).
    #[arg(long, env = "TOPODOC_SCHEME")]
    scheme: Option<String>,

    /// Enable verbose output (log every page).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or any page fails to render.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output_dir: self.output_dir,
            color_scheme: self.scheme,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let content = &config.content_resolved;

        output.field("Source", &content.source_dir.display().to_string());
        output.field("Output", &content.output_dir.display().to_string());
        output.field("Color scheme", &config.site.color_scheme);
        tracing::info!(
            source_dir = %content.source_dir.display(),
            output_dir = %content.output_dir.display(),
            scheme = %config.site.color_scheme,
            "Building static site"
        );

        let report = build_site(&config)?;

        tracing::info!(
            pages = report.pages,
            skipped = report.skipped,
            assets = report.assets,
            warnings = report.warnings,
            "Build finished"
        );
        output.build_summary(&report, &content.output_dir);
        Ok(())
    }
}

/// Render the configured site to its output directory.
fn build_site(config: &Config) -> Result<BuildReport, CliError> {
    let content = &config.content_resolved;
    let store: Arc<dyn ContentStore> = Arc::new(FsStore::new(content.source_dir.clone()));
    let composer = PageComposer::from_scheme_name(
        &config.site.color_scheme,
        store,
        ComposerOptions {
            title: config.site.title.clone(),
            stylesheet: config.site.stylesheet.clone(),
        },
    )?;

    let builder = StaticSiteBuilder::new(
        composer,
        BuildConfig {
            fragment_suffix: content.fragment_suffix.clone(),
            assets_dir: Some(content.assets_dir.clone()),
        },
    );
    Ok(builder.build(&content.output_dir)?)
}
