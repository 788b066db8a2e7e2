//! Static site builder.
//!
//! Renders every page fragment in a composer's content store to a standalone `.html`
//! file, mirroring the `/{section}/{page}.html` layout the server uses.

use std::fs;
use std::path::{Path, PathBuf};

use topodoc_storage::{FragmentKey, StorageError};

use crate::composer::{ComposeError, NEWS_FRAGMENT, PageComposer, SHARED_SECTION};
use crate::section::{ROOT_SECTION, RequestContext};

/// Site root page sending visitors to the home section.
const ROOT_INDEX: &str = "<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01 Transitional//EN\">
<html><head>
<meta http-equiv=\"refresh\" content=\"0; url=Home/index.html\">
</head>
<body><a href=\"Home/index.html\">Home</a></body>
</html>
";

/// Configuration for static site building.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    /// Suffix mapping fragments to page names (`faq_text.php` -> `faq.html`).
    pub fragment_suffix: String,
    /// Directory whose non-fragment files (stylesheets, images) are copied
    /// into the output.
    pub assets_dir: Option<PathBuf>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            fragment_suffix: "_text.php".to_owned(),
            assets_dir: None,
        }
    }
}

/// Summary of a completed build.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Pages written.
    pub pages: usize,
    /// Fragments that are not pages (no suffix, shared, news insert).
    pub skipped: usize,
    /// Asset files copied.
    pub assets: usize,
    /// Soft warnings across all pages.
    pub warnings: usize,
}

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Output could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Fragments could not be listed.
    #[error("Failed to list content: {0}")]
    Storage(#[from] StorageError),
    /// A page failed to compose.
    #[error("Failed to render {key}: {source}")]
    Render {
        /// Fragment being rendered.
        key: FragmentKey,
        /// Underlying composition error.
        #[source]
        source: ComposeError,
    },
}

/// Builds a static copy of the site from a composer's content store.
pub struct StaticSiteBuilder {
    composer: PageComposer,
    config: BuildConfig,
}

impl StaticSiteBuilder {
    /// Create a builder.
    #[must_use]
    pub fn new(composer: PageComposer, config: BuildConfig) -> Self {
        Self { composer, config }
    }

    /// Page name for a fragment, or `None` if the fragment isn't a page.
    fn page_name<'a>(&self, key: &'a FragmentKey) -> Option<&'a str> {
        if key.section == SHARED_SECTION
            || (key.section == ROOT_SECTION && key.fragment == NEWS_FRAGMENT)
        {
            return None;
        }
        key.fragment
            .strip_suffix(self.config.fragment_suffix.as_str())
            .filter(|name| !name.is_empty())
    }

    /// Render every page to `output_dir`.
    ///
    /// Stops at the first page that fails to compose.
    ///
    /// # Errors
    ///
    /// Returns an error if listing, composing or writing fails.
    pub fn build(&self, output_dir: &Path) -> Result<BuildReport, BuildError> {
        let mut report = BuildReport::default();

        fs::create_dir_all(output_dir)?;
        let output_root = fs::canonicalize(output_dir)?;

        if let Some(assets_dir) = &self.config.assets_dir {
            report.assets = self.copy_assets(assets_dir, output_dir, &output_root)?;
        }

        for key in self.composer.store().list()? {
            let Some(name) = self.page_name(&key) else {
                tracing::debug!(fragment = %key, "Skipping non-page fragment");
                report.skipped += 1;
                continue;
            };

            let context = RequestContext::new(key.section.clone());
            let page = self
                .composer
                .compose_page(&context, &key.fragment)
                .map_err(|source| BuildError::Render {
                    key: key.clone(),
                    source,
                })?;

            let section_dir = output_dir.join(&key.section);
            fs::create_dir_all(&section_dir)?;
            let path = section_dir.join(format!("{name}.html"));
            fs::write(&path, page.html)?;
            tracing::debug!(path = %path.display(), "Wrote page");

            report.pages += 1;
            report.warnings += page.warnings.len();
        }

        fs::write(output_dir.join("index.html"), ROOT_INDEX)?;

        tracing::info!(
            pages = report.pages,
            assets = report.assets,
            output_dir = %output_dir.display(),
            "Static site built"
        );
        Ok(report)
    }

    /// Copy asset files, leaving out fragments, hidden entries and the output
    /// directory itself.
    fn copy_assets(
        &self,
        assets_dir: &Path,
        output_dir: &Path,
        output_root: &Path,
    ) -> Result<usize, BuildError> {
        let mut copied = 0;
        let mut pending = vec![PathBuf::new()];

        while let Some(relative) = pending.pop() {
            for entry in fs::read_dir(assets_dir.join(&relative))? {
                let entry = entry?;
                let name = entry.file_name();
                let name = name.to_string_lossy();
                if name.starts_with('.') {
                    continue;
                }
                let path = relative.join(&*name);
                if entry.file_type()?.is_dir() {
                    if fs::canonicalize(entry.path()).is_ok_and(|dir| dir == output_root) {
                        continue;
                    }
                    pending.push(path);
                } else if !self.is_fragment_file(&name) {
                    let target = output_dir.join(&path);
                    if let Some(parent) = target.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    fs::copy(entry.path(), &target)?;
                    copied += 1;
                }
            }
        }

        Ok(copied)
    }

    /// Whether a file is page source rather than a servable asset.
    fn is_fragment_file(&self, name: &str) -> bool {
        name.ends_with(self.config.fragment_suffix.as_str())
            || Path::new(name)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("php"))
    }
}
