//! Refbook listing.

use std::collections::HashSet;

use chrono::NaiveDate;
use refbook_loader::RefbookQuery;
use refbook_types::{RefbookSummary, DATE_FORMAT};

use crate::error::{LookupError, LookupResult};

/// Parses the optional `date` filter.
///
/// A missing or empty value means no filter.
///
/// # Errors
///
/// `InvalidDate` if the value is not a `YYYY-MM-DD` calendar date.
pub fn parse_as_of_date(raw: Option<&str>) -> LookupResult<Option<NaiveDate>> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) if has_date_shape(value) => NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(Some)
            .map_err(|_| LookupError::InvalidDate {
                value: value.to_string(),
            }),
        Some(value) => Err(LookupError::InvalidDate {
            value: value.to_string(),
        }),
    }
}

/// Checks for `DDDD-D[D]-D[D]` with ASCII digits only; chrono alone would
/// also accept signs and surrounding whitespace.
fn has_date_shape(value: &str) -> bool {
    let mut parts = value.split('-');
    let widths = [4..=4, 1..=2, 1..=2];
    widths.iter().all(|width| {
        parts
            .next()
            .is_some_and(|part| width.contains(&part.len()) && part.bytes().all(|b| b.is_ascii_digit()))
    }) && parts.next().is_none()
}

/// Lists refbook summaries in id order.
///
/// `as_of` narrows the versions associated with each refbook, never which
/// refbooks are returned. Each refbook appears once.
pub fn list_refbooks(store: &dyn RefbookQuery, as_of: Option<NaiveDate>) -> LookupResult<Vec<RefbookSummary>> {
    let mut seen = HashSet::new();
    let summaries: Vec<RefbookSummary> = store
        .list_refbooks_filtered(as_of)?
        .into_iter()
        .filter(|r| seen.insert(r.refbook.id))
        .map(|r| r.refbook.summary())
        .collect();

    tracing::debug!(count = summaries.len(), ?as_of, "Listed refbooks");
    Ok(summaries)
}
