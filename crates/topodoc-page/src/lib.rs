//! Page composition engine for topodoc.
//!
//! Turns a section's content fragment into a complete HTML page with a
//! consistent look across the site: document header, section banner, side
//! menu, optional news insert and trailer.
//!
//! Composition is pure apart from reading fragments through a
//! [`ContentStore`](topodoc_storage::ContentStore). The serving directory and
//! color scheme are passed in explicitly, so the same [`PageComposer`] backs
//! both the HTTP server and the [`StaticSiteBuilder`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use topodoc_page::{ComposerOptions, PageComposer, RequestContext};
//! use topodoc_storage::MemoryStore;
//!
//! let store = MemoryStore::new()
//!     .with_fragment("Home", "index_text.php", "<P>Welcome.</P>")
//!     .with_fragment("Home", "news_text.php", "<P>New release.</P>");
//! let composer =
//!     PageComposer::from_scheme_name("modern", Arc::new(store), ComposerOptions::default())
//!         .unwrap();
//!
//! let page = composer.compose_default(&RequestContext::new("/srv/doc/Home")).unwrap();
//! assert!(page.html.contains("topo-banner3.png"));
//! assert!(page.html.contains("<P>New release.</P>"));
//! ```

mod banner;
mod builder;
mod composer;
mod html;
mod menu;
mod section;
mod xref;

pub use banner::render_banner;
pub use builder::{BuildConfig, BuildError, BuildReport, StaticSiteBuilder};
pub use composer::{
    ComposeError, ComposerOptions, NEWS_FRAGMENT, PageComposer, PageWarning, RenderedPage,
    SHARED_SECTION, TRAILER_FRAGMENT,
};
pub use menu::{MENU_ENTRIES, MenuEntry, SITE_ROOT_HREF, render_menu};
pub use section::{
    DEFAULT_FRAGMENT, KNOWN_SECTIONS, ROOT_SECTION, RequestContext, Section, display_name,
    resolve_section,
};
pub use xref::{Expansion, class_ref, expand_references, fn_ref, module_ref};
