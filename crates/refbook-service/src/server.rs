//! Lookup server: binds the query operations to a store and a clock.

use std::sync::Arc;

use chrono::NaiveDate;
use refbook_loader::RefbookQuery;
use refbook_types::{ElementEntry, RefbookId, RefbookSummary, VersionSelector};

use crate::clock::{Clock, SystemClock};
use crate::error::LookupResult;
use crate::{listing, lookup, resolver};

/// Refbook lookup server.
///
/// Cheap to clone; all clones share the same store and clock.
#[derive(Clone)]
pub struct RefbookServer {
    store: Arc<dyn RefbookQuery>,
    clock: Arc<dyn Clock>,
}

impl RefbookServer {
    /// Creates a server over the given store, using the system clock.
    pub fn new(store: impl RefbookQuery + 'static) -> Self {
        Self {
            store: Arc::new(store),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock used for "current version" resolution.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &dyn RefbookQuery {
        self.store.as_ref()
    }

    /// Returns the reference date for requests without a version.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Lists refbooks, optionally filtered by a raw `YYYY-MM-DD` date.
    pub fn list_refbooks(&self, date: Option<&str>) -> LookupResult<Vec<RefbookSummary>> {
        let as_of = listing::parse_as_of_date(date)?;
        listing::list_refbooks(self.store(), as_of)
    }

    /// Returns the elements of a refbook version.
    ///
    /// Without a version label the version current as of today is used.
    pub fn get_elements(&self, refbook_id: RefbookId, version: Option<&str>) -> LookupResult<Vec<ElementEntry>> {
        let selector = VersionSelector::from_param(version, self.today());
        let resolved = resolver::resolve_version(self.store(), refbook_id, &selector)?;
        lookup::list_elements(self.store(), &resolved)
    }

    /// Checks whether a refbook version holds this exact code/value pair.
    pub fn check_element(
        &self,
        refbook_id: RefbookId,
        code: Option<&str>,
        value: Option<&str>,
        version: Option<&str>,
    ) -> LookupResult<bool> {
        let selector = VersionSelector::from_param(version, self.today());
        lookup::check_element_exists(self.store(), refbook_id, code, value, &selector)
    }
}

impl std::fmt::Debug for RefbookServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefbookServer")
            .field("today", &self.today())
            .finish_non_exhaustive()
    }
}
