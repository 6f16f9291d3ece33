//! Refbook type.

use crate::RefbookId;

/// A versioned reference dictionary.
///
/// `code` is globally unique across refbooks. A refbook owns zero or more
/// [`Version`](crate::Version)s; deleting it removes them as well.
///
/// # Examples
///
/// ```
/// use refbook_types::Refbook;
///
/// let refbook = Refbook::new(1, "MS1", "Медицинские специальности");
/// assert!(refbook.description.is_empty());
/// assert_eq!(refbook.summary().code, "MS1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Refbook {
    /// Surrogate identifier.
    pub id: RefbookId,
    /// Globally unique code, e.g. `ICD-10`.
    pub code: String,
    /// Human-readable name.
    pub name: String,
    /// Free-form description, may be empty.
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl Refbook {
    /// Creates a refbook with an empty description.
    pub fn new(id: RefbookId, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            description: String::new(),
        }
    }

    /// Returns the public listing view of this refbook.
    pub fn summary(&self) -> RefbookSummary {
        RefbookSummary {
            id: self.id,
            code: self.code.clone(),
            name: self.name.clone(),
        }
    }
}

/// The listing view of a refbook: `{id, code, name}`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RefbookSummary {
    /// Surrogate identifier.
    pub id: RefbookId,
    /// Refbook code.
    pub code: String,
    /// Refbook name.
    pub name: String,
}
