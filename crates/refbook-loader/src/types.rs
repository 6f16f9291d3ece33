//! Loader-specific types for refbook data files.

use std::path::PathBuf;
use thiserror::Error;

use crate::store::StoreError;

/// Errors that can occur while loading refbook data files.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// I/O error reading a data file.
    #[error("IO error reading data file: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("TSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid identifier format.
    #[error("Invalid identifier: {value}")]
    InvalidId {
        /// The invalid value that was encountered.
        value: String,
    },

    /// Invalid date format.
    #[error("Invalid date format: {value} (expected YYYY-MM-DD)")]
    InvalidDate {
        /// The invalid date value.
        value: String,
    },

    /// A required text column was empty.
    #[error("Empty value in required column: {column}")]
    EmptyField {
        /// The name of the empty column.
        column: &'static str,
    },

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Directory not found.
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Required file missing from the data directory.
    #[error("Required data file not found: {file_type} in {directory}")]
    RequiredFileMissing {
        /// The kind of file that was missing.
        file_type: String,
        /// The directory that was searched.
        directory: String,
    },

    /// Invalid header - column count mismatch.
    #[error("Invalid header: expected {expected} columns, found {found}")]
    InvalidHeader {
        /// Expected column count.
        expected: usize,
        /// Found column count.
        found: usize,
    },

    /// A data row's field count does not match the file format.
    #[error("Wrong field count: expected {expected} fields, found {found}")]
    FieldCount {
        /// Expected field count.
        expected: usize,
        /// Found field count.
        found: usize,
    },

    /// A data row was not valid UTF-8.
    #[error("Row is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// Unexpected column name.
    #[error("Unexpected column '{found}' at position {position}, expected '{expected}'")]
    UnexpectedColumn {
        /// The column position.
        position: usize,
        /// Expected column name.
        expected: String,
        /// Found column name.
        found: String,
    },

    /// A parsed row violated a store invariant.
    #[error("Rejected row: {0}")]
    Store(#[from] StoreError),
}

/// Result type for loader operations.
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Configuration for loading data files.
#[derive(Debug, Clone, Default)]
pub struct LoaderConfig {
    /// Skip malformed or rejected rows instead of failing the load.
    pub skip_invalid: bool,
}

impl LoaderConfig {
    /// Creates a config that skips malformed rows.
    pub fn lenient() -> Self {
        Self { skip_invalid: true }
    }
}

/// Counts from a completed load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Refbooks inserted.
    pub refbooks: usize,
    /// Versions inserted.
    pub versions: usize,
    /// Elements inserted.
    pub elements: usize,
    /// Rows skipped because they were malformed or rejected.
    pub skipped: usize,
}

impl LoadStats {
    /// Total number of rows inserted.
    pub fn total(&self) -> usize {
        self.refbooks + self.versions + self.elements
    }
}

/// Discovered data files in a refbook data directory.
#[derive(Debug, Clone, Default)]
pub struct RefbookFiles {
    /// Path to the refbooks file.
    pub refbook_file: Option<PathBuf>,
    /// Path to the versions file.
    pub version_file: Option<PathBuf>,
    /// Path to the elements file.
    pub element_file: Option<PathBuf>,
}

impl RefbookFiles {
    /// Creates a new empty file set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if all three data files are present.
    pub fn has_required_files(&self) -> bool {
        self.refbook_file.is_some() && self.version_file.is_some() && self.element_file.is_some()
    }

    /// Returns a list of missing data files.
    pub fn missing_files(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.refbook_file.is_none() {
            missing.push("Refbooks");
        }
        if self.version_file.is_none() {
            missing.push("Versions");
        }
        if self.element_file.is_none() {
            missing.push("Elements");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_config_default_is_strict() {
        assert!(!LoaderConfig::default().skip_invalid);
        assert!(LoaderConfig::lenient().skip_invalid);
    }

    #[test]
    fn test_load_stats_total() {
        let stats = LoadStats {
            refbooks: 2,
            versions: 3,
            elements: 10,
            skipped: 1,
        };
        assert_eq!(stats.total(), 15);
    }

    #[test]
    fn test_refbook_files_missing() {
        let files = RefbookFiles {
            refbook_file: Some(PathBuf::from("refbooks.tsv")),
            ..Default::default()
        };

        assert!(!files.has_required_files());
        let missing = files.missing_files();
        assert_eq!(missing, vec!["Versions", "Elements"]);
    }
}
