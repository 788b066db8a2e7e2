//! Full page composition.
//!
//! Provides [`PageComposer`], which wraps a content fragment in the document
//! header, section banner, optional news insert, navigation menu and trailer.

use std::fmt::Write;
use std::sync::Arc;

use topodoc_config::{ColorScheme, ConfigError, get_color_scheme};
use topodoc_storage::{ContentStore, StorageError, StorageErrorKind};

use crate::banner::render_banner;
use crate::html::escape_html;
use crate::menu::render_menu;
use crate::section::{DEFAULT_FRAGMENT, ROOT_SECTION, RequestContext, Section, resolve_section};
use crate::xref::expand_references;

/// Fragment injected above the root section's primary text.
pub const NEWS_FRAGMENT: &str = "news_text.php";

/// Section holding site-wide fragments.
pub const SHARED_SECTION: &str = "shared";

/// Trailer fragment looked up in [`SHARED_SECTION`].
pub const TRAILER_FRAGMENT: &str = "trailer.php";

/// Trailer used when the store has no trailer fragment.
const DEFAULT_TRAILER: &str = "<hr>\n<address>Topographica documentation</address>\n";

/// Non-fatal condition noticed while composing a page.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PageWarning {
    /// Resolved section is not one of the menu's content directories.
    #[error("Unknown section: {0:?}")]
    UnknownSection(String),
    /// Root page was composed without its news insert.
    #[error("News fragment {ROOT_SECTION}/{NEWS_FRAGMENT} not found")]
    NewsMissing,
    /// Inline directive that is not a reference helper call.
    #[error("Unsupported directive: {0}")]
    UnsupportedDirective(String),
}

/// Error returned when a page can't be composed.
///
/// No markup is produced when any of these occur.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    /// Color scheme could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Requested fragment is not in the content store.
    #[error("Content not found: {section}/{fragment}")]
    ContentNotFound {
        /// Section the fragment was looked up in.
        section: String,
        /// Requested fragment filename.
        fragment: String,
    },
    /// Content store failed for another reason.
    #[error("Storage error: {0}")]
    Storage(#[source] StorageError),
}

/// Presentation settings independent of the color scheme.
#[derive(Clone, Debug)]
pub struct ComposerOptions {
    /// Document title.
    pub title: String,
    /// Stylesheet href.
    pub stylesheet: String,
}

impl Default for ComposerOptions {
    fn default() -> Self {
        Self {
            title: "The Topographica Neural Map Simulator".to_owned(),
            stylesheet: "../shared/topo.css".to_owned(),
        }
    }
}

/// Result of composing a page.
#[derive(Clone, Debug)]
pub struct RenderedPage {
    /// Complete HTML document.
    pub html: String,
    /// Section the page was served from.
    pub section: Section,
    /// Fragment that forms the main content.
    pub fragment: String,
    /// Soft conditions noticed during composition.
    pub warnings: Vec<PageWarning>,
}

/// Assembles full pages from content fragments.
///
/// Holds only immutable state, so one composer can serve concurrent requests.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use topodoc_config::PARCHMENT;
/// use topodoc_page::{ComposerOptions, PageComposer, RequestContext};
/// use topodoc_storage::MemoryStore;
///
/// let store = MemoryStore::new().with_fragment("FAQ", "index_text.php", "<P>Answers.</P>");
/// let composer = PageComposer::new(PARCHMENT, Arc::new(store), ComposerOptions::default());
///
/// let page = composer
///     .compose_page(&RequestContext::new("/srv/doc/FAQ"), "index_text.php")
///     .unwrap();
/// assert!(page.html.contains("<P>Answers.</P>"));
/// ```
pub struct PageComposer {
    scheme: ColorScheme,
    store: Arc<dyn ContentStore>,
    options: ComposerOptions,
}

impl PageComposer {
    /// Create a composer with an explicit color scheme.
    #[must_use]
    pub fn new(scheme: ColorScheme, store: Arc<dyn ContentStore>, options: ComposerOptions) -> Self {
        Self {
            scheme,
            store,
            options,
        }
    }

    /// Create a composer, resolving the color scheme by name.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::Config`] if the scheme name is unknown.
    pub fn from_scheme_name(
        name: &str,
        store: Arc<dyn ContentStore>,
        options: ComposerOptions,
    ) -> Result<Self, ComposeError> {
        let scheme = get_color_scheme(name)?;
        Ok(Self::new(scheme, store, options))
    }

    /// Active color scheme.
    #[must_use]
    pub fn scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    /// Content store fragments are read from.
    #[must_use]
    pub fn store(&self) -> &dyn ContentStore {
        self.store.as_ref()
    }

    /// Compose a section's primary page.
    ///
    /// # Errors
    ///
    /// See [`PageComposer::compose_page`].
    pub fn compose_default(&self, context: &RequestContext) -> Result<RenderedPage, ComposeError> {
        self.compose_page(context, DEFAULT_FRAGMENT)
    }

    /// Compose one full page.
    ///
    /// Every fragment is read before any markup is assembled, so a failed
    /// lookup never leaves a partial document behind.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::ContentNotFound`] if the fragment is missing from
    /// the store and [`ComposeError::Storage`] if the store fails otherwise.
    pub fn compose_page(
        &self,
        context: &RequestContext,
        fragment: &str,
    ) -> Result<RenderedPage, ComposeError> {
        let section = resolve_section(context);
        tracing::debug!(section = %section, fragment, "Composing page");

        let mut warnings = Vec::new();
        if !section.is_known() {
            tracing::warn!(
                section = %section,
                serving_dir = context.serving_dir(),
                "Unknown section, using generic banner"
            );
            warnings.push(PageWarning::UnknownSection(section.name().to_owned()));
        }

        let main = self.read_required(&section, fragment)?;

        let news = if section.is_root() && fragment == DEFAULT_FRAGMENT {
            let news = self.read_optional(ROOT_SECTION, NEWS_FRAGMENT)?;
            if news.is_none() {
                tracing::warn!("News fragment missing, composing home page without it");
                warnings.push(PageWarning::NewsMissing);
            }
            news
        } else {
            None
        };

        let trailer = self.read_optional(SHARED_SECTION, TRAILER_FRAGMENT)?;

        let main = expand_references(&main);
        warnings.extend(main.warnings);
        let news = news.map(|text| {
            let expansion = expand_references(&text);
            warnings.extend(expansion.warnings);
            expansion.text
        });
        let trailer = match trailer {
            Some(text) => {
                let expansion = expand_references(&text);
                warnings.extend(expansion.warnings);
                expansion.text
            }
            None => DEFAULT_TRAILER.to_owned(),
        };

        let html = self.assemble(&section, news.as_deref(), &main.text, &trailer);

        Ok(RenderedPage {
            html,
            section,
            fragment: fragment.to_owned(),
            warnings,
        })
    }

    /// Read a fragment that must exist.
    ///
    /// The unknown section never addresses a store directory.
    fn read_required(&self, section: &Section, fragment: &str) -> Result<String, ComposeError> {
        let not_found = || ComposeError::ContentNotFound {
            section: section.name().to_owned(),
            fragment: fragment.to_owned(),
        };
        if section.is_unknown() {
            return Err(not_found());
        }
        self.store
            .read(section.name(), fragment)
            .map_err(|err| match err.kind {
                StorageErrorKind::NotFound | StorageErrorKind::InvalidPath => not_found(),
                _ => ComposeError::Storage(err),
            })
    }

    /// Read a fragment that may be absent.
    fn read_optional(&self, section: &str, fragment: &str) -> Result<Option<String>, ComposeError> {
        match self.store.read(section, fragment) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(ComposeError::Storage(err)),
        }
    }

    /// Lay out the page around already-loaded fragments.
    fn assemble(&self, section: &Section, news: Option<&str>, main: &str, trailer: &str) -> String {
        let scheme = &self.scheme;
        let mut html =
            String::with_capacity(4096 + main.len() + news.map_or(0, str::len) + trailer.len());

        // Header
        html.push_str("<!DOCTYPE HTML PUBLIC \"-//W3C//DTD HTML 4.01 Transitional//EN\">\n");
        html.push_str("<html><head>\n");
        html.push_str("<meta http-equiv=\"content-type\" content=\"text/html; charset=utf-8\">\n");
        let _ = writeln!(
            html,
            "<link rel=\"stylesheet\" type=\"text/css\" media=\"screen\" href=\"{}\">",
            escape_html(&self.options.stylesheet)
        );
        let _ = writeln!(html, "<title>{}</title>", escape_html(&self.options.title));
        html.push_str("</head>\n");
        let _ = writeln!(html, "<body bgcolor=\"{}\">", scheme.main_background);
        html.push_str("<blockquote>\n");

        html.push_str(&render_banner(section, scheme));

        if let Some(news) = news {
            html.push_str(news);
            html.push('\n');
        }

        // Two columns: menu on the left, content on the right
        let _ = write!(
            html,
            "<table border=\"0\" cellpadding=\"10\" width=\"100%\"><tr>\
             <td valign=\"top\" bgcolor=\"{}\" width=\"145\">\n",
            scheme.menu_background
        );
        html.push_str(&render_menu(section, scheme));
        let _ = writeln!(
            html,
            "</td><td valign=\"top\" bgcolor=\"{}\">",
            scheme.banner_background
        );
        html.push_str(main);
        html.push_str("\n</td></tr></table>\n");

        html.push_str(trailer);
        html.push_str("</blockquote>\n</body>\n</html>\n");
        html
    }
}
