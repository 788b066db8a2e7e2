//! Configuration management for topodoc.
//!
//! Parses `topodoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories. Also hosts the
//! closed set of page [color schemes](scheme).
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `server.host`
//! - `site.title`

mod expand;
pub mod scheme;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use scheme::{ColorScheme, DEFAULT_SCHEME, MODERN, PARCHMENT, SCHEME_NAMES, get_color_scheme};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override fragment source directory.
    pub source_dir: Option<PathBuf>,
    /// Override static build output directory.
    pub output_dir: Option<PathBuf>,
    /// Override color scheme name.
    pub color_scheme: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "topodoc.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Site branding configuration.
    pub site: SiteConfig,
    /// Content locations (paths are relative strings from TOML).
    content: ContentConfigRaw,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
        }
    }
}

/// Site branding configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Document title shown in the browser.
    pub title: String,
    /// Color scheme name (see [`SCHEME_NAMES`]).
    pub color_scheme: String,
    /// Stylesheet href, relative to a section page.
    pub stylesheet: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "The Topographica Neural Map Simulator".to_owned(),
            color_scheme: DEFAULT_SCHEME.to_owned(),
            stylesheet: "../shared/topo.css".to_owned(),
        }
    }
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    source_dir: Option<String>,
    assets_dir: Option<String>,
    output_dir: Option<String>,
    fragment_suffix: Option<String>,
}

/// Default suffix appended to a page name to find its fragment.
const DEFAULT_FRAGMENT_SUFFIX: &str = "_text.php";

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Fragment tree root (`<source_dir>/<Section>/<fragment>`).
    pub source_dir: PathBuf,
    /// Directory served for stylesheets and images.
    pub assets_dir: PathBuf,
    /// Static build destination.
    pub output_dir: PathBuf,
    /// Suffix mapping page names to fragment files (`faq` -> `faq_text.php`).
    pub fragment_suffix: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`server.host`").
        field: String,
        /// Error message (e.g., "${`TOPODOC_HOST`} not set").
        message: String,
    },
    /// Color scheme name outside the known set.
    #[error("Unknown color scheme: {0} (expected one of: {known})", known = SCHEME_NAMES.join(", "))]
    UnknownScheme(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `topodoc.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, then the
    /// final configuration is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Resolve the configured color scheme.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownScheme`] if the name is not known.
    pub fn color_scheme(&self) -> Result<ColorScheme, ConfigError> {
        get_color_scheme(&self.site.color_scheme)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(source_dir) = &settings.source_dir {
            self.content_resolved.source_dir.clone_from(source_dir);
            if self.content.assets_dir.is_none() {
                self.content_resolved.assets_dir.clone_from(source_dir);
            }
        }
        if let Some(output_dir) = &settings.output_dir {
            self.content_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(color_scheme) = &settings.color_scheme {
            self.site.color_scheme.clone_from(color_scheme);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            server: ServerConfig::default(),
            site: SiteConfig::default(),
            content: ContentConfigRaw::default(),
            content_resolved: ContentConfig {
                source_dir: base.join("doc"),
                assets_dir: base.join("doc"),
                output_dir: base.join("site"),
                fragment_suffix: DEFAULT_FRAGMENT_SUFFIX.to_owned(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called by [`Config::load`] after CLI settings are applied.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` or `ConfigError::UnknownScheme` if any
    /// check fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_server()?;
        self.color_scheme()?;
        require_non_empty(
            &self.content_resolved.fragment_suffix,
            "content.fragment_suffix",
        )?;
        self.validate_output_dir()?;
        Ok(())
    }

    /// Reject an output directory inside the content or asset tree.
    ///
    /// Builds would otherwise read back their own output as content.
    fn validate_output_dir(&self) -> Result<(), ConfigError> {
        let content = &self.content_resolved;
        for (dir, field) in [
            (&content.source_dir, "content.source_dir"),
            (&content.assets_dir, "content.assets_dir"),
        ] {
            if content.output_dir.starts_with(dir) {
                return Err(ConfigError::Validation(format!(
                    "content.output_dir ({}) cannot be inside {field} ({})",
                    content.output_dir.display(),
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    /// Validate server configuration.
    fn validate_server(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;

        // Port 0 is technically valid (OS assigns a random port), but it's
        // unlikely to be intentional in a config file
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        self.site.title = expand::expand_env(&self.site.title, "site.title")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        let source_dir = resolve(self.content.source_dir.as_deref(), "doc");
        // Assets live next to the fragments unless configured otherwise
        let assets_dir = self
            .content
            .assets_dir
            .as_deref()
            .map_or_else(|| source_dir.clone(), |dir| config_dir.join(dir));

        self.content_resolved = ContentConfig {
            source_dir,
            assets_dir,
            output_dir: resolve(self.content.output_dir.as_deref(), "site"),
            fragment_suffix: self
                .content
                .fragment_suffix
                .clone()
                .unwrap_or_else(|| DEFAULT_FRAGMENT_SUFFIX.to_owned()),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7979);
        assert_eq!(config.site.color_scheme, "parchment");
        assert_eq!(config.site.stylesheet, "../shared/topo.css");
        assert_eq!(
            config.content_resolved.source_dir,
            PathBuf::from("/test/doc")
        );
        assert_eq!(
            config.content_resolved.output_dir,
            PathBuf::from("/test/site")
        );
        assert_eq!(config.content_resolved.fragment_suffix, "_text.php");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 7979);
        assert_eq!(config.site.title, "The Topographica Neural Map Simulator");
    }

    #[test]
    fn test_parse_site_config() {
        let toml = r#"
[site]
title = "Topographica"
color_scheme = "modern"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.site.title, "Topographica");
        assert_eq!(config.color_scheme().unwrap(), MODERN);
        // Unset keys keep their defaults
        assert_eq!(config.site.stylesheet, "../shared/topo.css");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[content]
source_dir = "pages"
assets_dir = "static"
output_dir = "public"
fragment_suffix = ".html.part"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.content_resolved.source_dir,
            PathBuf::from("/project/pages")
        );
        assert_eq!(
            config.content_resolved.assets_dir,
            PathBuf::from("/project/static")
        );
        assert_eq!(
            config.content_resolved.output_dir,
            PathBuf::from("/project/public")
        );
        assert_eq!(config.content_resolved.fragment_suffix, ".html.part");
    }

    #[test]
    fn test_assets_dir_defaults_to_source_dir() {
        let toml = r#"
[content]
source_dir = "pages"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.content_resolved.assets_dir,
            PathBuf::from("/project/pages")
        );
    }

    #[test]
    fn test_validate_unknown_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.color_scheme = "sepia".to_owned();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownScheme(_)));
        assert!(err.to_string().contains("parchment, modern"));
    }

    #[test]
    fn test_validate_port_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.port = 0;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("server.port"));
    }

    #[test]
    fn test_validate_empty_host() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.server.host = String::new();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.host cannot be empty"));
    }

    #[test]
    fn test_validate_empty_fragment_suffix() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.content_resolved.fragment_suffix = String::new();

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_output_inside_source_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.content_resolved.output_dir = PathBuf::from("/test/doc/site");

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("cannot be inside content.source_dir"));
    }

    #[test]
    fn test_validate_output_inside_assets_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.content_resolved.assets_dir = PathBuf::from("/test/static");
        config.content_resolved.output_dir = PathBuf::from("/test/static/out");

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("content.assets_dir"));
    }

    #[test]
    fn test_validate_output_beside_source_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        // Shares a name prefix but is a sibling directory
        config.content_resolved.output_dir = PathBuf::from("/test/docs-site");

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            port: Some(9000),
            output_dir: Some(PathBuf::from("/out")),
            color_scheme: Some("modern".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "127.0.0.1"); // Unchanged
        assert_eq!(config.content_resolved.output_dir, PathBuf::from("/out"));
        assert_eq!(config.site.color_scheme, "modern");
    }

    #[test]
    fn test_cli_source_dir_moves_default_assets_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/elsewhere/doc")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.content_resolved.source_dir, PathBuf::from("/elsewhere/doc"));
        assert_eq!(config.content_resolved.assets_dir, PathBuf::from("/elsewhere/doc"));
    }

    #[test]
    fn test_cli_source_dir_keeps_configured_assets_dir() {
        let toml = r#"
[content]
assets_dir = "static"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/elsewhere/doc")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.content_resolved.assets_dir, PathBuf::from("/project/static"));
    }

    #[test]
    fn test_load_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topodoc.toml");
        std::fs::write(
            &path,
            "[server]\nport = 8081\n\n[content]\nsource_dir = \"docs\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.server.port, 8081);
        assert_eq!(config.content_resolved.source_dir, dir.path().join("docs"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_rejects_unknown_scheme_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topodoc.toml");
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            color_scheme: Some("neon".to_owned()),
            ..Default::default()
        };

        let err = Config::load(Some(&path), Some(&overrides)).unwrap_err();

        assert!(matches!(err, ConfigError::UnknownScheme(ref name) if name == "neon"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Some(Path::new("/nonexistent/topodoc.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("topodoc.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
