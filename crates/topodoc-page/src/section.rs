//! Section resolution from the serving context.
//!
//! A section is the last component of the directory a page is served from.
//! It selects the banner style and the directory fragments are read from.

use std::fmt;

/// Section that gets the full logo banner and the news insert.
pub const ROOT_SECTION: &str = "Home";

/// Primary fragment of every section.
pub const DEFAULT_FRAGMENT: &str = "index_text.php";

/// Content directories linked from the navigation menu.
pub const KNOWN_SECTIONS: [&str; 12] = [
    "Home",
    "News",
    "Downloads",
    "Tutorials",
    "User_Manual",
    "Reference_Manual",
    "Developer_Manual",
    "Forums",
    "Team_Members",
    "Future_Work",
    "FAQ",
    "Links",
];

/// Where a page request is being served from.
///
/// Supplied by the caller (HTTP adapter, static builder) instead of being read
/// from process environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestContext {
    serving_dir: String,
}

impl RequestContext {
    /// Create a context for the given serving directory (e.g., `/srv/doc/FAQ`).
    #[must_use]
    pub fn new(serving_dir: impl Into<String>) -> Self {
        Self {
            serving_dir: serving_dir.into(),
        }
    }

    /// Directory the request is served from.
    #[must_use]
    pub fn serving_dir(&self) -> &str {
        &self.serving_dir
    }
}

/// Named documentation area, one per content directory.
///
/// An empty name is the "unknown" sentinel produced for an empty path.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Section(String);

impl Section {
    /// Create a section from its directory name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Directory name of the section.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Whether this is the site root section.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0 == ROOT_SECTION
    }

    /// Whether the section is one of the menu's content directories.
    #[must_use]
    pub fn is_known(&self) -> bool {
        KNOWN_SECTIONS.contains(&self.0.as_str())
    }

    /// Whether the section could not be resolved at all.
    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.0.is_empty()
    }

    /// Human-readable name, see [`display_name`].
    #[must_use]
    pub fn display_name(&self) -> String {
        display_name(self)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Derive the section from the last component of the serving directory.
///
/// Trailing separators are ignored and both `/` and `\` count as separators,
/// so `/a/b/Home`, `/a/b/Home/` and `Home` all resolve to `Home`. An empty
/// path yields the unknown sentinel.
#[must_use]
pub fn resolve_section(context: &RequestContext) -> Section {
    let trimmed = context.serving_dir().trim_end_matches(is_separator);
    let last = trimmed.rsplit(is_separator).next().unwrap_or_default();
    Section::new(last)
}

/// Section name for display: underscores become spaces.
#[must_use]
pub fn display_name(section: &Section) -> String {
    section.name().replace('_', " ")
}
