//! In-memory content store.
//!
//! Provides [`MemoryStore`] for bundled asset maps and for unit testing without
//! filesystem access.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::store::{ContentStore, FragmentKey, StorageError};

/// Backend identifier for error messages.
const BACKEND: &str = "Memory";

/// Content store backed by an in-memory map.
///
/// # Example
///
/// ```
/// use topodoc_storage::{ContentStore, MemoryStore};
///
/// let store = MemoryStore::new()
///     .with_fragment("FAQ", "index_text.php", "<P>Questions.</P>");
///
/// assert_eq!(store.read("FAQ", "index_text.php").unwrap(), "<P>Questions.</P>");
/// assert!(!store.exists("FAQ", "other_text.php"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    fragments: BTreeMap<FragmentKey, String>,
}

impl MemoryStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fragment, replacing any previous text under the same key.
    #[must_use]
    pub fn with_fragment(
        mut self,
        section: impl Into<String>,
        fragment: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.insert(section, fragment, text);
        self
    }

    /// Insert a fragment, replacing any previous text under the same key.
    pub fn insert(
        &mut self,
        section: impl Into<String>,
        fragment: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.fragments
            .insert(FragmentKey::new(section, fragment), text.into());
    }
}

impl ContentStore for MemoryStore {
    fn read(&self, section: &str, fragment: &str) -> Result<String, StorageError> {
        self.fragments
            .get(&FragmentKey::new(section, fragment))
            .cloned()
            .ok_or_else(|| {
                StorageError::not_found(PathBuf::from(section).join(fragment))
                    .with_backend(BACKEND)
            })
    }

    fn exists(&self, section: &str, fragment: &str) -> bool {
        self.fragments
            .contains_key(&FragmentKey::new(section, fragment))
    }

    fn list(&self) -> Result<Vec<FragmentKey>, StorageError> {
        Ok(self.fragments.keys().cloned().collect())
    }
}
