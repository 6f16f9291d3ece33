//! # refbook-loader
//!
//! Storage layer for versioned reference dictionaries.
//!
//! - [`discover_refbook_files`] finds the tab-separated data files in a directory
//! - [`RefbookStore`] loads them, enforces the uniqueness and cascade rules,
//!   and answers queries through the [`RefbookQuery`] trait
//!
//! ```ignore
//! use refbook_loader::{discover_refbook_files, LoaderConfig, RefbookQuery, RefbookStore};
//!
//! let files = discover_refbook_files("./data")?;
//! let mut store = RefbookStore::new();
//! store.load_all(&files, &LoaderConfig::default())?;
//!
//! let refbooks = store.list_refbooks_filtered(None)?;
//! ```

#![warn(missing_docs)]

mod element;
mod loader;
pub mod parser;
mod query;
mod refbook;
mod store;
mod types;
mod version;

pub use loader::discover_refbook_files;
pub use parser::{TsvParser, TsvRecord};
pub use query::{RefbookQuery, RefbookWithVersions};
pub use store::{RefbookStore, StoreError, StoreResult};
pub use types::{LoadStats, LoaderConfig, LoaderError, LoaderResult, RefbookFiles};

// Re-export refbook-types for convenience
pub use refbook_types;
