//! Version resolution.
//!
//! Given a refbook id and a [`VersionSelector`], picks exactly one version:
//!
//! - `Explicit(name)`: the version with that label
//! - `AsOfDate(date)`: the version with the latest `date_start <= date`
//!
//! The refbook's existence is always checked first so a missing refbook is
//! never reported as a missing version.

use refbook_loader::RefbookQuery;
use refbook_types::{Refbook, RefbookId, Version, VersionSelector};

use crate::error::{LookupError, LookupResult, VersionMiss};

/// Returns the refbook or `RefbookNotFound`.
pub fn require_refbook(store: &dyn RefbookQuery, refbook_id: RefbookId) -> LookupResult<Refbook> {
    store
        .find_refbook_by_id(refbook_id)?
        .ok_or_else(|| LookupError::RefbookNotFound {
            id: refbook_id.to_string(),
        })
}

/// Finds the version a selector points at, without checking the refbook.
///
/// Returns `Ok(None)` when nothing matches.
pub fn select_version(
    store: &dyn RefbookQuery,
    refbook_id: RefbookId,
    selector: &VersionSelector,
) -> LookupResult<Option<Version>> {
    let version = match selector {
        VersionSelector::Explicit(name) => store.find_version(refbook_id, name)?,
        VersionSelector::AsOfDate(date) => store.find_current_version(refbook_id, *date)?,
    };
    Ok(version)
}

/// Resolves the single version a request refers to.
///
/// # Errors
///
/// - `RefbookNotFound` if the refbook does not exist
/// - `VersionNotFound(Explicit)` if the named version does not exist
/// - `VersionNotFound(Current)` if no version has started as of the date
pub fn resolve_version(
    store: &dyn RefbookQuery,
    refbook_id: RefbookId,
    selector: &VersionSelector,
) -> LookupResult<Version> {
    require_refbook(store, refbook_id)?;

    let miss = if selector.is_explicit() {
        VersionMiss::Explicit
    } else {
        VersionMiss::Current
    };

    let version = select_version(store, refbook_id, selector)?
        .ok_or(LookupError::VersionNotFound(miss))?;

    tracing::debug!(
        refbook_id,
        version = %version.version,
        date_start = %version.date_start,
        "Resolved {:?}",
        selector
    );
    Ok(version)
}
