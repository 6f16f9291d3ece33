//! Version selection.

use chrono::NaiveDate;

/// Calendar date format accepted at the query boundary (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Chooses which version of a refbook a request refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionSelector {
    /// The version with exactly this label.
    Explicit(String),
    /// The version with the latest `date_start` not after this date.
    AsOfDate(NaiveDate),
}

impl VersionSelector {
    /// Builds a selector from an optional version label.
    ///
    /// A missing or empty label selects the version current as of `today`.
    pub fn from_param(version: Option<&str>, today: NaiveDate) -> Self {
        match version {
            Some(name) if !name.is_empty() => Self::Explicit(name.to_string()),
            _ => Self::AsOfDate(today),
        }
    }

    /// Returns true if this selector names an explicit version.
    pub fn is_explicit(&self) -> bool {
        matches!(self, Self::Explicit(_))
    }
}
