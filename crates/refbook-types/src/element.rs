//! Refbook element type.

use crate::{ElementId, VersionId};

/// One code → value entry of a refbook version.
///
/// A code appears at most once per version.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    /// Surrogate identifier.
    pub id: ElementId,
    /// Owning version.
    pub version_id: VersionId,
    /// Element code, e.g. `J00`.
    pub code: String,
    /// Element value.
    pub value: String,
}

impl Element {
    /// Returns true if both `code` and `value` match exactly.
    ///
    /// Comparison is case-sensitive; a matching code alone is not enough.
    pub fn matches(&self, code: &str, value: &str) -> bool {
        self.code == code && self.value == value
    }

    /// Returns the `{code, value}` view of this element.
    pub fn entry(&self) -> ElementEntry {
        ElementEntry {
            code: self.code.clone(),
            value: self.value.clone(),
        }
    }
}

/// The public view of an element: `{code, value}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementEntry {
    /// Element code.
    pub code: String,
    /// Element value.
    pub value: String,
}
