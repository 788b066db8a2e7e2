//! Content store trait and error types.
//!
//! Provides the core [`ContentStore`] trait for looking up content fragments,
//! along with [`StorageError`] for unified error handling across backends.
//!
//! # Key Convention
//!
//! Fragments are addressed by `(section, fragment)`:
//! - `section` - content directory name (e.g., `"Home"`, `"User_Manual"`)
//! - `fragment` - fragment filename inside it (e.g., `"index_text.php"`)

use std::fmt;
use std::path::PathBuf;

/// Address of a content fragment.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FragmentKey {
    /// Section (content directory) name.
    pub section: String,
    /// Fragment filename.
    pub fragment: String,
}

impl FragmentKey {
    /// Create a key from section and fragment names.
    #[must_use]
    pub fn new(section: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            fragment: fragment.into(),
        }
    }
}

impl fmt::Display for FragmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.section, self.fragment)
    }
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum StorageErrorKind {
    /// Fragment does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Section or fragment name would escape the store.
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Storage error with semantic kind and backend-specific source.
#[derive(Debug)]
pub struct StorageError {
    /// Semantic error category.
    pub kind: StorageErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    /// Backend identifier (e.g., "Fs", "Memory").
    pub backend: Option<&'static str>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StorageError {
    /// Create a new storage error.
    #[must_use]
    pub fn new(kind: StorageErrorKind) -> Self {
        Self {
            kind,
            path: None,
            backend: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach backend identifier.
    #[must_use]
    pub fn with_backend(mut self, backend: &'static str) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(StorageErrorKind::NotFound).with_path(path)
    }

    /// Create a storage error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: Option<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => StorageErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
            _ => StorageErrorKind::Other,
        };
        let mut error = Self::new(kind).with_source(err);
        if let Some(p) = path {
            error = error.with_path(p);
        }
        error
    }

    /// Whether the error means the fragment is simply absent.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Format: "[Backend] Kind: message (path: /foo/bar)"
        if let Some(backend) = self.backend {
            write!(f, "[{backend}] ")?;
        }

        let kind_str = match self.kind {
            StorageErrorKind::NotFound => "Not found",
            StorageErrorKind::PermissionDenied => "Permission denied",
            StorageErrorKind::InvalidPath => "Invalid path",
            StorageErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|s| s.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Read-only lookup of content fragments.
///
/// Implementations map `(section, fragment)` keys to raw markup text. The text
/// is returned as-is; callers treat it as opaque.
pub trait ContentStore: Send + Sync {
    /// Read a fragment's markup.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] with [`StorageErrorKind::NotFound`] if the
    /// fragment doesn't exist, or another kind if it can't be read.
    fn read(&self, section: &str, fragment: &str) -> Result<String, StorageError>;

    /// Check if a fragment exists.
    ///
    /// Returns `false` on errors (treats errors as "doesn't exist").
    fn exists(&self, section: &str, fragment: &str) -> bool;

    /// List every fragment in the store, sorted by section then fragment.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend can't be enumerated.
    fn list(&self) -> Result<Vec<FragmentKey>, StorageError>;
}
