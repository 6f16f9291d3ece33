//! Read-only query interface over refbook storage.
//!
//! The lookup services depend only on [`RefbookQuery`]; [`RefbookStore`]
//! is the in-memory implementation.

use chrono::NaiveDate;
use refbook_types::{Element, Refbook, RefbookId, Version, VersionId};

use crate::store::{RefbookStore, StoreResult};

/// A refbook with the versions associated under a date filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefbookWithVersions {
    /// The refbook.
    pub refbook: Refbook,
    /// Associated versions, latest `date_start` first.
    pub versions: Vec<Version>,
}

/// Read access to refbooks, versions and elements.
///
/// Implementations must return results in the documented order so that
/// repeated queries over unchanged data are identical.
pub trait RefbookQuery: Send + Sync {
    /// Returns the refbook with this id.
    fn find_refbook_by_id(&self, id: RefbookId) -> StoreResult<Option<Refbook>>;

    /// Returns the refbook with this code.
    fn find_refbook_by_code(&self, code: &str) -> StoreResult<Option<Refbook>>;

    /// Returns every refbook in id order.
    ///
    /// When `as_of` is given each refbook carries only the versions with
    /// `date_start <= as_of`. Refbooks without such versions are still
    /// returned; the filter never narrows membership.
    fn list_refbooks_filtered(&self, as_of: Option<NaiveDate>) -> StoreResult<Vec<RefbookWithVersions>>;

    /// Returns the refbook's version with this label.
    fn find_version(&self, refbook_id: RefbookId, name: &str) -> StoreResult<Option<Version>>;

    /// Returns the refbook's versions with `date_start <= max_date` (all
    /// versions when `None`), latest `date_start` first.
    fn list_versions(&self, refbook_id: RefbookId, max_date: Option<NaiveDate>) -> StoreResult<Vec<Version>>;

    /// Returns the refbook's version with the latest `date_start <= date`.
    fn find_current_version(&self, refbook_id: RefbookId, date: NaiveDate) -> StoreResult<Option<Version>> {
        Ok(self.list_versions(refbook_id, Some(date))?.into_iter().next())
    }

    /// Returns the version's elements in id order.
    fn list_elements(&self, version_id: VersionId) -> StoreResult<Vec<Element>>;

    /// Returns true if the version has an element with exactly this code and value.
    fn element_exists(&self, version_id: VersionId, code: &str, value: &str) -> StoreResult<bool>;
}

impl RefbookQuery for RefbookStore {
    fn find_refbook_by_id(&self, id: RefbookId) -> StoreResult<Option<Refbook>> {
        Ok(self.get_refbook(id).cloned())
    }

    fn find_refbook_by_code(&self, code: &str) -> StoreResult<Option<Refbook>> {
        Ok(self.get_refbook_by_code(code).cloned())
    }

    fn list_refbooks_filtered(&self, as_of: Option<NaiveDate>) -> StoreResult<Vec<RefbookWithVersions>> {
        // One entry per refbook, versions attached separately: a join over
        // versions would drop refbooks with no qualifying version.
        self.refbooks()
            .map(|refbook| -> StoreResult<RefbookWithVersions> {
                Ok(RefbookWithVersions {
                    refbook: refbook.clone(),
                    versions: self.list_versions(refbook.id, as_of)?,
                })
            })
            .collect()
    }

    fn find_version(&self, refbook_id: RefbookId, name: &str) -> StoreResult<Option<Version>> {
        Ok(self
            .versions_newest_first(refbook_id)
            .find(|v| v.version == name)
            .cloned())
    }

    fn list_versions(&self, refbook_id: RefbookId, max_date: Option<NaiveDate>) -> StoreResult<Vec<Version>> {
        Ok(self
            .versions_newest_first(refbook_id)
            .filter(|v| max_date.map_or(true, |date| v.is_active_on(date)))
            .cloned()
            .collect())
    }

    fn find_current_version(&self, refbook_id: RefbookId, date: NaiveDate) -> StoreResult<Option<Version>> {
        Ok(self.current_version(refbook_id, date).cloned())
    }

    fn list_elements(&self, version_id: VersionId) -> StoreResult<Vec<Element>> {
        Ok(self.elements(version_id).cloned().collect())
    }

    fn element_exists(&self, version_id: VersionId, code: &str, value: &str) -> StoreResult<bool> {
        Ok(self
            .get_element_by_code(version_id, code)
            .is_some_and(|e| e.matches(code, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_test_store() -> RefbookStore {
        let mut store = RefbookStore::new();
        store
            .insert_refbooks([
                Refbook::new(1, "MS1", "Специальности"),
                Refbook::new(2, "ICD-10", "МКБ-10"),
                Refbook::new(3, "EMPTY", "Без версий"),
            ])
            .unwrap();
        store
            .insert_versions([
                Version { id: 1, refbook_id: 1, version: "v1".into(), date_start: date(2022, 9, 1) },
                Version { id: 2, refbook_id: 2, version: "v1".into(), date_start: date(2022, 10, 1) },
                Version { id: 3, refbook_id: 2, version: "v2".into(), date_start: date(2023, 1, 1) },
            ])
            .unwrap();
        store
            .insert_elements([
                Element { id: 1, version_id: 1, code: "J00".into(), value: "Test Value 1.0".into() },
                Element { id: 2, version_id: 2, code: "J01".into(), value: "Test Value 2.0".into() },
            ])
            .unwrap();
        store
    }

    #[test]
    fn test_list_refbooks_filtered_keeps_membership() {
        let store = make_test_store();

        let listed = store.list_refbooks_filtered(Some(date(2022, 9, 15))).unwrap();
        let ids: Vec<RefbookId> = listed.iter().map(|r| r.refbook.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        assert_eq!(listed[0].versions.len(), 1);
        assert!(listed[1].versions.is_empty());
        assert!(listed[2].versions.is_empty());
    }

    #[test]
    fn test_list_refbooks_unfiltered_attaches_all_versions() {
        let store = make_test_store();

        let listed = store.list_refbooks_filtered(None).unwrap();
        let labels: Vec<&str> = listed[1].versions.iter().map(|v| v.version.as_str()).collect();
        assert_eq!(labels, vec!["v2", "v1"]);
    }

    #[test]
    fn test_list_versions_with_max_date() {
        let store = make_test_store();

        let versions = store.list_versions(2, Some(date(2022, 10, 1))).unwrap();
        assert_eq!(versions.len(), 1);
        assert_eq!(versions[0].version, "v1");

        assert!(store.list_versions(2, Some(date(2022, 1, 1))).unwrap().is_empty());
        assert!(store.list_versions(99, None).unwrap().is_empty());
    }

    #[test]
    fn test_find_current_version_matches_default_lookup() {
        struct ListOnly(RefbookStore);

        impl RefbookQuery for ListOnly {
            fn find_refbook_by_id(&self, id: RefbookId) -> StoreResult<Option<Refbook>> {
                self.0.find_refbook_by_id(id)
            }
            fn find_refbook_by_code(&self, code: &str) -> StoreResult<Option<Refbook>> {
                self.0.find_refbook_by_code(code)
            }
            fn list_refbooks_filtered(&self, as_of: Option<NaiveDate>) -> StoreResult<Vec<RefbookWithVersions>> {
                self.0.list_refbooks_filtered(as_of)
            }
            fn find_version(&self, refbook_id: RefbookId, name: &str) -> StoreResult<Option<Version>> {
                self.0.find_version(refbook_id, name)
            }
            fn list_versions(&self, refbook_id: RefbookId, max_date: Option<NaiveDate>) -> StoreResult<Vec<Version>> {
                self.0.list_versions(refbook_id, max_date)
            }
            fn list_elements(&self, version_id: VersionId) -> StoreResult<Vec<Element>> {
                self.0.list_elements(version_id)
            }
            fn element_exists(&self, version_id: VersionId, code: &str, value: &str) -> StoreResult<bool> {
                self.0.element_exists(version_id, code, value)
            }
        }

        let store = make_test_store();
        let list_only = ListOnly(make_test_store());

        for day in [date(2022, 9, 30), date(2022, 10, 1), date(2022, 12, 31), date(2023, 1, 1), date(2030, 1, 1)] {
            assert_eq!(
                RefbookQuery::find_current_version(&store, 2, day).unwrap(),
                list_only.find_current_version(2, day).unwrap(),
                "{day}"
            );
        }
        assert_eq!(
            RefbookQuery::find_current_version(&store, 2, date(2023, 1, 1)).unwrap().unwrap().version,
            "v2"
        );
        assert!(RefbookQuery::find_current_version(&store, 99, date(2030, 1, 1)).unwrap().is_none());
    }

    #[test]
    fn test_find_version_and_refbook() {
        let store = make_test_store();

        assert_eq!(store.find_version(2, "v2").unwrap().unwrap().id, 3);
        assert!(store.find_version(1, "v2").unwrap().is_none());
        assert_eq!(store.find_refbook_by_code("MS1").unwrap().unwrap().id, 1);
        assert!(store.find_refbook_by_id(999).unwrap().is_none());
    }

    #[test]
    fn test_element_exists_requires_exact_pair() {
        let store = make_test_store();

        assert!(store.element_exists(1, "J00", "Test Value 1.0").unwrap());
        assert!(!store.element_exists(1, "J00", "test value 1.0").unwrap());
        assert!(!store.element_exists(1, "J01", "Test Value 2.0").unwrap());
        assert!(!store.element_exists(99, "J00", "Test Value 1.0").unwrap());
    }

    #[test]
    fn test_queries_are_repeatable() {
        let store = make_test_store();

        assert_eq!(store.list_elements(1).unwrap(), store.list_elements(1).unwrap());
        assert_eq!(
            store.list_refbooks_filtered(Some(date(2023, 6, 1))).unwrap(),
            store.list_refbooks_filtered(Some(date(2023, 6, 1))).unwrap()
        );
    }
}
