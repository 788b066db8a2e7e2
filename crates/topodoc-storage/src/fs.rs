//! Filesystem content store.
//!
//! Provides [`FsStore`] for reading fragments laid out as
//! `<root>/<section>/<fragment>`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::store::{ContentStore, FragmentKey, StorageError, StorageErrorKind};

/// Backend identifier for error messages.
const BACKEND: &str = "Fs";

/// Content store reading fragments from a directory tree.
///
/// Each first-level directory under the root is a section; each regular file
/// inside it is a fragment. Hidden entries (leading `.`) are ignored.
///
/// # Example
///
/// ```ignore
/// use std::path::PathBuf;
/// use topodoc_storage::{ContentStore, FsStore};
///
/// let store = FsStore::new(PathBuf::from("doc"));
/// let text = store.read("FAQ", "index_text.php")?;
/// ```
#[derive(Debug, Clone)]
pub struct FsStore {
    /// Root directory holding one directory per section.
    root: PathBuf,
}

impl FsStore {
    /// Create a filesystem store rooted at `root`.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Validate that a name is a single, plain path component.
    ///
    /// Rejects empty names, `.`/`..`, and anything containing a separator so a
    /// key can never address a file outside its section directory.
    fn validate_component(name: &str) -> Result<(), StorageError> {
        let invalid = name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\'])
            || Path::new(name).is_absolute();

        if invalid {
            return Err(StorageError::new(StorageErrorKind::InvalidPath)
                .with_path(name)
                .with_backend(BACKEND));
        }
        Ok(())
    }

    /// Resolve a key to its file path.
    fn fragment_path(&self, section: &str, fragment: &str) -> Result<PathBuf, StorageError> {
        Self::validate_component(section)?;
        Self::validate_component(fragment)?;
        Ok(self.root.join(section).join(fragment))
    }

    /// List visible entries of a directory matching `keep`, by file name.
    fn visible_entries(
        dir: &Path,
        keep: impl Fn(&fs::FileType) -> bool,
    ) -> Result<Vec<String>, StorageError> {
        let entries = fs::read_dir(dir)
            .map_err(|e| StorageError::io(e, Some(dir.to_path_buf())).with_backend(BACKEND))?;

        let mut names: Vec<String> = entries
            .filter_map(Result::ok)
            .filter(|e| e.file_type().is_ok_and(|t| keep(&t)))
            .filter_map(|e| e.file_name().into_string().ok())
            .filter(|name| !name.starts_with('.'))
            .collect();
        names.sort();
        Ok(names)
    }
}

/// Decode fragment bytes as UTF-8, falling back to Latin-1.
///
/// Older fragments are stored as ISO-8859-1, where every byte maps directly to
/// the code point of the same value.
fn decode_text(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes).unwrap_or_else(|err| {
        tracing::debug!("Fragment is not valid UTF-8, decoding as Latin-1");
        err.into_bytes().into_iter().map(char::from).collect()
    })
}

impl ContentStore for FsStore {
    fn read(&self, section: &str, fragment: &str) -> Result<String, StorageError> {
        let path = self.fragment_path(section, fragment)?;
        let bytes = fs::read(&path)
            .map_err(|e| StorageError::io(e, Some(path.clone())).with_backend(BACKEND))?;
        Ok(decode_text(bytes))
    }

    fn exists(&self, section: &str, fragment: &str) -> bool {
        self.fragment_path(section, fragment)
            .is_ok_and(|path| path.is_file())
    }

    fn list(&self) -> Result<Vec<FragmentKey>, StorageError> {
        let mut keys = Vec::new();
        for section in Self::visible_entries(&self.root, fs::FileType::is_dir)? {
            let dir = self.root.join(&section);
            for fragment in Self::visible_entries(&dir, fs::FileType::is_file)? {
                keys.push(FragmentKey::new(section.clone(), fragment));
            }
        }
        tracing::debug!(count = keys.len(), root = %self.root.display(), "Listed fragments");
        Ok(keys)
    }
}
