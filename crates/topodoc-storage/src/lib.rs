//! Content fragment storage for topodoc.
//!
//! This crate provides a [`ContentStore`] trait that decouples page composition
//! from where fragments live. This enables:
//!
//! - **Unit testing** with in-memory fixtures
//! - **Backend flexibility** (directory tree, bundled asset map)
//! - **Clean separation** between rendering logic and I/O
//!
//! # Architecture
//!
//! The crate provides:
//! - [`ContentStore`] trait with `read()`, `exists()`, and `list()` methods
//! - [`FsStore`] reading `<root>/<section>/<fragment>` from disk
//! - [`MemoryStore`] holding fragments in memory
//!
//! # Example
//!
//! ```ignore
//! use std::path::PathBuf;
//! use topodoc_storage::{ContentStore, FsStore};
//!
//! let store = FsStore::new(PathBuf::from("doc"));
//! for key in store.list()? {
//!     println!("{key}");
//! }
//! ```

mod fs;
mod memory;
mod store;

pub use fs::FsStore;
pub use memory::MemoryStore;
pub use store::{ContentStore, FragmentKey, StorageError, StorageErrorKind};
