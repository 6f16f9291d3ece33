//! Refbook version type.

use chrono::NaiveDate;

use crate::{RefbookId, VersionId};

/// A dated snapshot of a refbook's content.
///
/// A version is the applicable one from `date_start` until a later version
/// of the same refbook starts. Within one refbook both the `version` label
/// and the `date_start` are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Version {
    /// Surrogate identifier.
    pub id: VersionId,
    /// Owning refbook.
    pub refbook_id: RefbookId,
    /// Version label, e.g. `v1`.
    pub version: String,
    /// First date on which this version applies.
    pub date_start: NaiveDate,
}

impl Version {
    /// Returns true if this version has started on or before `date`.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.date_start <= date
    }
}
