//! Element queries against a resolved version.
//!
//! Listing and existence checks treat absence differently: a version with
//! no elements is an error when listing, while a missing code/value pair is
//! a plain `false` when checking.

use refbook_loader::RefbookQuery;
use refbook_types::{ElementEntry, RefbookId, Version, VersionSelector};

use crate::error::{LookupError, LookupResult, VersionMiss};
use crate::resolver::{require_refbook, select_version};

/// Returns the `{code, value}` entries of a version in id order.
///
/// # Errors
///
/// `ElementsNotFound` if the version holds no elements.
pub fn list_elements(store: &dyn RefbookQuery, version: &Version) -> LookupResult<Vec<ElementEntry>> {
    let elements = store.list_elements(version.id)?;
    if elements.is_empty() {
        return Err(LookupError::ElementsNotFound {
            version_id: version.id,
        });
    }
    Ok(elements.iter().map(|e| e.entry()).collect())
}

/// Checks whether a refbook version holds an element with exactly this
/// code and value.
///
/// `code` and `value` are validated before storage is touched; an empty
/// string counts as missing.
///
/// # Errors
///
/// - `MissingParameters` if `code` or `value` is missing
/// - `RefbookNotFound` if the refbook does not exist
/// - `VersionNotFound(NoValid)` if the selector matches no version
pub fn check_element_exists(
    store: &dyn RefbookQuery,
    refbook_id: RefbookId,
    code: Option<&str>,
    value: Option<&str>,
    selector: &VersionSelector,
) -> LookupResult<bool> {
    let (code, value) = match (code, value) {
        (Some(code), Some(value)) if !code.is_empty() && !value.is_empty() => (code, value),
        _ => return Err(LookupError::MissingParameters),
    };

    require_refbook(store, refbook_id)?;

    let version = select_version(store, refbook_id, selector)?
        .ok_or(LookupError::VersionNotFound(VersionMiss::NoValid))?;

    let exists = store.element_exists(version.id, code, value)?;
    tracing::debug!(refbook_id, version = %version.version, code, exists, "Checked element");
    Ok(exists)
}
