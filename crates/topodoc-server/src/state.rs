//! Application state.
//!
//! Shared state for all request handlers.

use std::path::Path;

use topodoc_page::PageComposer;
use tower_http::services::ServeDir;

/// Application state shared across all handlers.
///
/// Immutable after startup; each request resolves its own section.
pub(crate) struct AppState {
    /// Page composer with the active color scheme and content store.
    pub(crate) composer: PageComposer,
    /// Suffix mapping page names to fragments (`faq` -> `faq_text.php`).
    pub(crate) fragment_suffix: String,
    /// Static asset service.
    pub(crate) assets: ServeDir,
    /// Enable verbose output (show page warnings).
    pub(crate) verbose: bool,
    /// Application version for cache invalidation.
    pub(crate) version: String,
}

impl AppState {
    /// Fragment filename for a page name.
    pub(crate) fn fragment_for(&self, page: &str) -> String {
        format!("{page}{}", self.fragment_suffix)
    }

    /// Whether a file name is page source, never served as an asset.
    pub(crate) fn is_fragment_file(&self, name: &str) -> bool {
        name.ends_with(self.fragment_suffix.as_str())
            || Path::new(name)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("php"))
    }
}
