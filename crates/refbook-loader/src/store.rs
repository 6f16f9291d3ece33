//! In-memory refbook data store.
//!
//! Holds refbooks, their versions and the versions' elements, and enforces
//! the uniqueness and ownership rules the lookup services rely on:
//!
//! - refbook `code` is globally unique
//! - within a refbook, version labels and start dates are unique
//! - within a version, element codes are unique
//! - deleting a refbook removes its versions, deleting a version removes
//!   its elements
//!
//! ```ignore
//! let files = discover_refbook_files("./data")?;
//! let mut store = RefbookStore::new();
//! let stats = store.load_all(&files, &LoaderConfig::default())?;
//! println!("loaded {} elements", stats.elements);
//! ```

use std::collections::{BTreeMap, HashMap};
#[cfg(feature = "parallel")]
use std::fs::File;
#[cfg(feature = "parallel")]
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use refbook_types::{Element, ElementId, Refbook, RefbookId, Version, VersionId};
use thiserror::Error;

use crate::parser::TsvParser;
use crate::types::{LoadStats, LoaderConfig, LoaderResult, RefbookFiles};

/// Errors raised by the store when a row violates an invariant, or by a
/// storage backend that cannot answer a query.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// An entity with this identifier already exists.
    #[error("duplicate {entity} id {id}")]
    DuplicateId {
        /// Entity kind.
        entity: &'static str,
        /// The duplicated identifier.
        id: u32,
    },

    /// A refbook with this code already exists.
    #[error("duplicate refbook code '{code}'")]
    DuplicateRefbookCode {
        /// The duplicated code.
        code: String,
    },

    /// The refbook already has a version with this label.
    #[error("refbook {refbook_id} already has version '{version}'")]
    DuplicateVersionLabel {
        /// Owning refbook.
        refbook_id: RefbookId,
        /// The duplicated label.
        version: String,
    },

    /// The refbook already has a version starting on this date.
    #[error("refbook {refbook_id} already has a version starting {date_start}")]
    DuplicateDateStart {
        /// Owning refbook.
        refbook_id: RefbookId,
        /// The duplicated start date.
        date_start: NaiveDate,
    },

    /// The version already has an element with this code.
    #[error("version {version_id} already has element '{code}'")]
    DuplicateElementCode {
        /// Owning version.
        version_id: VersionId,
        /// The duplicated code.
        code: String,
    },

    /// The referenced parent does not exist.
    #[error("{entity} {id} does not exist")]
    MissingParent {
        /// Parent entity kind.
        entity: &'static str,
        /// The missing identifier.
        id: u32,
    },

    /// A required text field was empty.
    #[error("{entity} field '{field}' must not be empty")]
    EmptyField {
        /// Entity kind.
        entity: &'static str,
        /// Field name.
        field: &'static str,
    },

    /// The storage backend could not answer.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// In-memory store for refbook data.
#[derive(Default)]
pub struct RefbookStore {
    /// Refbooks in id order.
    refbooks: BTreeMap<RefbookId, Refbook>,
    /// Refbook code -> id.
    refbook_ids_by_code: HashMap<String, RefbookId>,
    /// Versions indexed by id.
    versions: HashMap<VersionId, Version>,
    /// Refbook id -> (date_start -> version id).
    versions_by_refbook: HashMap<RefbookId, BTreeMap<NaiveDate, VersionId>>,
    /// Version id -> elements in id order.
    elements_by_version: HashMap<VersionId, BTreeMap<ElementId, Element>>,
    /// Version id -> (element code -> element id).
    element_codes_by_version: HashMap<VersionId, HashMap<String, ElementId>>,
    /// Element id -> owning version id.
    element_owner: HashMap<ElementId, VersionId>,
}

impl std::fmt::Debug for RefbookStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefbookStore")
            .field("refbooks", &self.refbooks.len())
            .field("versions", &self.versions.len())
            .field("elements", &self.element_owner.len())
            .finish()
    }
}

impl RefbookStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // LOADING
    // ═══════════════════════════════════════════════════════════════════════════

    /// Loads all data files from a discovered file set.
    ///
    /// Refbooks are loaded before versions and versions before elements so
    /// that parent references resolve.
    pub fn load_all(&mut self, files: &RefbookFiles, config: &LoaderConfig) -> LoaderResult<LoadStats> {
        let mut stats = LoadStats::default();

        if let Some(ref path) = files.refbook_file {
            let (inserted, skipped) = self.load_refbooks(path, config)?;
            stats.refbooks = inserted;
            stats.skipped += skipped;
        }

        if let Some(ref path) = files.version_file {
            let (inserted, skipped) = self.load_versions(path, config)?;
            stats.versions = inserted;
            stats.skipped += skipped;
        }

        if let Some(ref path) = files.element_file {
            #[cfg(feature = "parallel")]
            let (inserted, skipped) = self.load_elements_parallel(path, config)?;
            #[cfg(not(feature = "parallel"))]
            let (inserted, skipped) = self.load_elements(path, config)?;
            stats.elements = inserted;
            stats.skipped += skipped;
        }

        Ok(stats)
    }

    /// Loads refbooks from a data file. Returns `(inserted, skipped)`.
    pub fn load_refbooks<P: AsRef<Path>>(
        &mut self,
        path: P,
        config: &LoaderConfig,
    ) -> LoaderResult<(usize, usize)> {
        let parser = TsvParser::<_, Refbook>::from_path(path)?;
        self.ingest(parser, config, Self::insert_refbook)
    }

    /// Loads versions from a data file. Returns `(inserted, skipped)`.
    pub fn load_versions<P: AsRef<Path>>(
        &mut self,
        path: P,
        config: &LoaderConfig,
    ) -> LoaderResult<(usize, usize)> {
        let parser = TsvParser::<_, Version>::from_path(path)?;
        self.ingest(parser, config, Self::insert_version)
    }

    /// Loads elements from a data file. Returns `(inserted, skipped)`.
    pub fn load_elements<P: AsRef<Path>>(
        &mut self,
        path: P,
        config: &LoaderConfig,
    ) -> LoaderResult<(usize, usize)> {
        let parser = TsvParser::<_, Element>::from_path(path)?;
        self.ingest(parser, config, Self::insert_element)
    }

    /// Loads elements from a data file using parallel parsing.
    ///
    /// Lines are parsed in parallel with rayon, then inserted in file order
    /// so the outcome matches [`load_elements`](Self::load_elements). Rows are
    /// decoded one at a time, so a row that is not valid UTF-8 is rejected on
    /// its own like any other malformed row.
    #[cfg(feature = "parallel")]
    pub fn load_elements_parallel<P: AsRef<Path>>(
        &mut self,
        path: P,
        config: &LoaderConfig,
    ) -> LoaderResult<(usize, usize)> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(crate::types::LoaderError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let mut content = Vec::new();
        BufReader::new(File::open(path)?).read_to_end(&mut content)?;

        let mut lines = content.split(|b| *b == b'\n');
        let header = lines.next().unwrap_or_default();
        // Header validation only; the parser itself is discarded.
        TsvParser::<_, Element>::from_reader(header)?;

        let lines: Vec<&[u8]> = lines
            .filter(|line| !crate::element::is_blank_line(line))
            .collect();

        let parsed: Vec<LoaderResult<Element>> = lines
            .par_iter()
            .map(|line| crate::element::parse_element_line(line))
            .collect();

        self.ingest(parsed.into_iter(), config, Self::insert_element)
    }

    /// Inserts parsed records, honouring `skip_invalid`.
    fn ingest<T, I>(
        &mut self,
        records: I,
        config: &LoaderConfig,
        insert: fn(&mut Self, T) -> StoreResult<()>,
    ) -> LoaderResult<(usize, usize)>
    where
        I: Iterator<Item = LoaderResult<T>>,
    {
        let mut inserted = 0;
        let mut skipped = 0;

        for record in records {
            let outcome = record.and_then(|r| insert(self, r).map_err(Into::into));
            match outcome {
                Ok(()) => inserted += 1,
                Err(e) if config.skip_invalid => {
                    tracing::warn!("Skipping row: {}", e);
                    skipped += 1;
                }
                Err(e) => return Err(e),
            }
        }

        Ok((inserted, skipped))
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // MUTATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Inserts a refbook.
    pub fn insert_refbook(&mut self, refbook: Refbook) -> StoreResult<()> {
        if refbook.code.trim().is_empty() {
            return Err(StoreError::EmptyField { entity: "refbook", field: "code" });
        }
        if refbook.name.trim().is_empty() {
            return Err(StoreError::EmptyField { entity: "refbook", field: "name" });
        }
        if self.refbooks.contains_key(&refbook.id) {
            return Err(StoreError::DuplicateId { entity: "refbook", id: refbook.id });
        }
        if self.refbook_ids_by_code.contains_key(&refbook.code) {
            return Err(StoreError::DuplicateRefbookCode { code: refbook.code });
        }

        self.refbook_ids_by_code.insert(refbook.code.clone(), refbook.id);
        self.refbooks.insert(refbook.id, refbook);
        Ok(())
    }

    /// Inserts a version of an existing refbook.
    pub fn insert_version(&mut self, version: Version) -> StoreResult<()> {
        if version.version.trim().is_empty() {
            return Err(StoreError::EmptyField { entity: "version", field: "version" });
        }
        if !self.refbooks.contains_key(&version.refbook_id) {
            return Err(StoreError::MissingParent { entity: "refbook", id: version.refbook_id });
        }
        if self.versions.contains_key(&version.id) {
            return Err(StoreError::DuplicateId { entity: "version", id: version.id });
        }

        let by_date = self.versions_by_refbook.entry(version.refbook_id).or_default();
        if by_date.contains_key(&version.date_start) {
            return Err(StoreError::DuplicateDateStart {
                refbook_id: version.refbook_id,
                date_start: version.date_start,
            });
        }
        let versions = &self.versions;
        if by_date
            .values()
            .filter_map(|id| versions.get(id))
            .any(|v| v.version == version.version)
        {
            return Err(StoreError::DuplicateVersionLabel {
                refbook_id: version.refbook_id,
                version: version.version,
            });
        }

        by_date.insert(version.date_start, version.id);
        self.versions.insert(version.id, version);
        Ok(())
    }

    /// Inserts an element of an existing version.
    pub fn insert_element(&mut self, element: Element) -> StoreResult<()> {
        if element.code.trim().is_empty() {
            return Err(StoreError::EmptyField { entity: "element", field: "code" });
        }
        if element.value.trim().is_empty() {
            return Err(StoreError::EmptyField { entity: "element", field: "value" });
        }
        if !self.versions.contains_key(&element.version_id) {
            return Err(StoreError::MissingParent { entity: "version", id: element.version_id });
        }
        if self.element_owner.contains_key(&element.id) {
            return Err(StoreError::DuplicateId { entity: "element", id: element.id });
        }

        let codes = self.element_codes_by_version.entry(element.version_id).or_default();
        if codes.contains_key(&element.code) {
            return Err(StoreError::DuplicateElementCode {
                version_id: element.version_id,
                code: element.code,
            });
        }

        codes.insert(element.code.clone(), element.id);
        self.element_owner.insert(element.id, element.version_id);
        self.elements_by_version
            .entry(element.version_id)
            .or_default()
            .insert(element.id, element);
        Ok(())
    }

    /// Bulk inserts refbooks, stopping at the first rejected one.
    pub fn insert_refbooks(&mut self, refbooks: impl IntoIterator<Item = Refbook>) -> StoreResult<usize> {
        refbooks
            .into_iter()
            .try_fold(0, |n, r| self.insert_refbook(r).map(|()| n + 1))
    }

    /// Bulk inserts versions, stopping at the first rejected one.
    pub fn insert_versions(&mut self, versions: impl IntoIterator<Item = Version>) -> StoreResult<usize> {
        versions
            .into_iter()
            .try_fold(0, |n, v| self.insert_version(v).map(|()| n + 1))
    }

    /// Bulk inserts elements, stopping at the first rejected one.
    pub fn insert_elements(&mut self, elements: impl IntoIterator<Item = Element>) -> StoreResult<usize> {
        elements
            .into_iter()
            .try_fold(0, |n, e| self.insert_element(e).map(|()| n + 1))
    }

    /// Removes a refbook together with its versions and their elements.
    pub fn delete_refbook(&mut self, id: RefbookId) -> Option<Refbook> {
        let refbook = self.refbooks.remove(&id)?;
        self.refbook_ids_by_code.remove(&refbook.code);

        let version_ids: Vec<VersionId> = self
            .versions_by_refbook
            .remove(&id)
            .map(|by_date| by_date.into_values().collect())
            .unwrap_or_default();
        for version_id in version_ids {
            self.delete_elements(version_id);
            self.versions.remove(&version_id);
        }

        Some(refbook)
    }

    /// Removes a version together with its elements.
    pub fn delete_version(&mut self, id: VersionId) -> Option<Version> {
        let version = self.versions.remove(&id)?;
        if let Some(by_date) = self.versions_by_refbook.get_mut(&version.refbook_id) {
            by_date.remove(&version.date_start);
        }
        self.delete_elements(id);
        Some(version)
    }

    /// Removes every element of a version, keeping the version itself.
    ///
    /// Returns the number of elements removed.
    pub fn delete_elements(&mut self, version_id: VersionId) -> usize {
        self.element_codes_by_version.remove(&version_id);
        let Some(elements) = self.elements_by_version.remove(&version_id) else {
            return 0;
        };
        for id in elements.keys() {
            self.element_owner.remove(id);
        }
        elements.len()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // LOOKUP
    // ═══════════════════════════════════════════════════════════════════════════

    /// Returns a refbook by id.
    pub fn get_refbook(&self, id: RefbookId) -> Option<&Refbook> {
        self.refbooks.get(&id)
    }

    /// Returns a refbook by its unique code.
    pub fn get_refbook_by_code(&self, code: &str) -> Option<&Refbook> {
        self.refbook_ids_by_code
            .get(code)
            .and_then(|id| self.refbooks.get(id))
    }

    /// Iterates refbooks in id order.
    pub fn refbooks(&self) -> impl Iterator<Item = &Refbook> {
        self.refbooks.values()
    }

    /// Returns a version by id.
    pub fn get_version(&self, id: VersionId) -> Option<&Version> {
        self.versions.get(&id)
    }

    /// Iterates a refbook's versions, latest `date_start` first.
    pub fn versions_newest_first(&self, refbook_id: RefbookId) -> impl Iterator<Item = &Version> {
        self.versions_by_refbook
            .get(&refbook_id)
            .into_iter()
            .flat_map(|by_date| by_date.values().rev())
            .filter_map(|id| self.versions.get(id))
    }

    /// Returns the version of a refbook current as of `date`, if any.
    pub fn current_version(&self, refbook_id: RefbookId, date: NaiveDate) -> Option<&Version> {
        self.versions_by_refbook
            .get(&refbook_id)?
            .range(..=date)
            .next_back()
            .and_then(|(_, id)| self.versions.get(id))
    }

    /// Iterates a version's elements in id order.
    pub fn elements(&self, version_id: VersionId) -> impl Iterator<Item = &Element> {
        self.elements_by_version
            .get(&version_id)
            .into_iter()
            .flat_map(|elements| elements.values())
    }

    /// Returns the element of a version with this code, if any.
    pub fn get_element_by_code(&self, version_id: VersionId, code: &str) -> Option<&Element> {
        let id = self.element_codes_by_version.get(&version_id)?.get(code)?;
        self.elements_by_version.get(&version_id)?.get(id)
    }

    /// Number of refbooks.
    pub fn refbook_count(&self) -> usize {
        self.refbooks.len()
    }

    /// Number of versions.
    pub fn version_count(&self) -> usize {
        self.versions.len()
    }

    /// Number of elements.
    pub fn element_count(&self) -> usize {
        self.element_owner.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_version(id: VersionId, refbook_id: RefbookId, label: &str, start: NaiveDate) -> Version {
        Version {
            id,
            refbook_id,
            version: label.to_string(),
            date_start: start,
        }
    }

    fn make_element(id: ElementId, version_id: VersionId, code: &str, value: &str) -> Element {
        Element {
            id,
            version_id,
            code: code.to_string(),
            value: value.to_string(),
        }
    }

    fn make_test_store() -> RefbookStore {
        let mut store = RefbookStore::new();
        store
            .insert_refbooks([Refbook::new(1, "MS1", "Специальности"), Refbook::new(2, "ICD-10", "МКБ-10")])
            .unwrap();
        store
            .insert_versions([
                make_version(1, 1, "v1", date(2022, 9, 1)),
                make_version(2, 2, "v1", date(2022, 10, 1)),
                make_version(3, 2, "v2", date(2023, 1, 1)),
            ])
            .unwrap();
        store
            .insert_elements([
                make_element(1, 1, "J00", "Test Value 1.0"),
                make_element(2, 2, "J01", "Test Value 2.0"),
            ])
            .unwrap();
        store
    }

    #[test]
    fn test_store_counts() {
        let store = make_test_store();
        assert_eq!(store.refbook_count(), 2);
        assert_eq!(store.version_count(), 3);
        assert_eq!(store.element_count(), 2);
        assert_eq!(store.get_refbook_by_code("ICD-10").unwrap().id, 2);
        assert!(store.get_refbook_by_code("ICD-11").is_none());
    }

    #[test]
    fn test_duplicate_refbook_code_rejected() {
        let mut store = make_test_store();
        let err = store.insert_refbook(Refbook::new(3, "MS1", "Другое")).unwrap_err();
        assert_eq!(err, StoreError::DuplicateRefbookCode { code: "MS1".to_string() });
    }

    #[test]
    fn test_version_uniqueness_per_refbook() {
        let mut store = make_test_store();

        let same_label = store.insert_version(make_version(4, 2, "v2", date(2024, 1, 1)));
        assert!(matches!(same_label, Err(StoreError::DuplicateVersionLabel { .. })));

        let same_date = store.insert_version(make_version(4, 2, "v3", date(2023, 1, 1)));
        assert!(matches!(same_date, Err(StoreError::DuplicateDateStart { .. })));

        // Same label and date under a different refbook is fine
        store.insert_version(make_version(4, 1, "v2", date(2023, 1, 1))).unwrap();
    }

    #[test]
    fn test_element_code_unique_per_version() {
        let mut store = make_test_store();
        let err = store
            .insert_element(make_element(9, 1, "J00", "Другое значение"))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateElementCode { version_id: 1, .. }));

        store.insert_element(make_element(9, 3, "J00", "Test Value 1.0")).unwrap();
    }

    #[test]
    fn test_missing_parent_rejected() {
        let mut store = make_test_store();
        assert!(matches!(
            store.insert_version(make_version(9, 99, "v1", date(2022, 1, 1))),
            Err(StoreError::MissingParent { entity: "refbook", id: 99 })
        ));
        assert!(matches!(
            store.insert_element(make_element(9, 99, "X", "Y")),
            Err(StoreError::MissingParent { entity: "version", id: 99 })
        ));
    }

    #[test]
    fn test_current_version_picks_latest_start_not_after_date() {
        let store = make_test_store();

        assert!(store.current_version(2, date(2022, 9, 30)).is_none());
        assert_eq!(store.current_version(2, date(2022, 10, 1)).unwrap().version, "v1");
        assert_eq!(store.current_version(2, date(2022, 12, 31)).unwrap().version, "v1");
        assert_eq!(store.current_version(2, date(2023, 1, 1)).unwrap().version, "v2");
    }

    #[test]
    fn test_versions_newest_first() {
        let store = make_test_store();
        let labels: Vec<&str> = store
            .versions_newest_first(2)
            .map(|v| v.version.as_str())
            .collect();
        assert_eq!(labels, vec!["v2", "v1"]);
    }

    #[test]
    fn test_delete_refbook_cascades() {
        let mut store = make_test_store();

        let removed = store.delete_refbook(2).unwrap();
        assert_eq!(removed.code, "ICD-10");
        assert_eq!(store.refbook_count(), 1);
        assert_eq!(store.version_count(), 1);
        assert_eq!(store.element_count(), 1);
        assert!(store.get_version(2).is_none());
        assert!(store.get_refbook_by_code("ICD-10").is_none());

        // The freed code can be reused
        store.insert_refbook(Refbook::new(5, "ICD-10", "МКБ-10")).unwrap();
    }

    #[test]
    fn test_delete_version_cascades() {
        let mut store = make_test_store();

        store.delete_version(2).unwrap();
        assert_eq!(store.element_count(), 1);
        assert!(store.current_version(2, date(2022, 12, 1)).is_none());
        assert!(store.delete_version(2).is_none());
    }

    #[test]
    fn test_delete_elements_keeps_version() {
        let mut store = make_test_store();

        assert_eq!(store.delete_elements(1), 1);
        assert!(store.get_version(1).is_some());
        assert_eq!(store.elements(1).count(), 0);
        assert!(store.get_element_by_code(1, "J00").is_none());
        assert_eq!(store.delete_elements(1), 0);
    }

    #[test]
    fn test_elements_in_id_order() {
        let mut store = make_test_store();
        store.insert_element(make_element(10, 3, "B", "second")).unwrap();
        store.insert_element(make_element(5, 3, "A", "first")).unwrap();

        let codes: Vec<&str> = store.elements(3).map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["A", "B"]);
    }

    fn write_fixture(dir: &Path, elements: impl AsRef<[u8]>) -> RefbookFiles {
        std::fs::write(
            dir.join("refbooks.tsv"),
            "id\tcode\tname\tdescription\n1\tMS1\tСпециальности\t\n2\tICD-10\tМКБ-10\tБолезни\n",
        )
        .unwrap();
        std::fs::write(
            dir.join("versions.tsv"),
            "id\trefbookId\tversion\tdateStart\n1\t1\tv1\t2022-09-01\n2\t2\tv1\t2022-10-01\n3\t2\tv2\t2023-01-01\n",
        )
        .unwrap();
        std::fs::write(dir.join("elements.tsv"), elements).unwrap();
        crate::discover_refbook_files(dir).unwrap()
    }

    #[test]
    fn test_load_all_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_fixture(
            dir.path(),
            "id\tversionId\tcode\tvalue\n1\t1\tJ00\tTest Value 1.0\n2\t2\tJ01\tTest Value 2.0\n",
        );

        let mut store = RefbookStore::new();
        let stats = store.load_all(&files, &LoaderConfig::default()).unwrap();

        assert_eq!(
            stats,
            LoadStats {
                refbooks: 2,
                versions: 3,
                elements: 2,
                skipped: 0
            }
        );
        assert!(store.get_element_by_code(1, "J00").is_some());
    }

    #[test]
    fn test_load_strict_fails_on_bad_row() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_fixture(
            dir.path(),
            "id\tversionId\tcode\tvalue\n1\t1\tJ00\tTest Value 1.0\n2\t1\tJ00\tDuplicate\n",
        );

        let mut store = RefbookStore::new();
        let result = store.load_all(&files, &LoaderConfig::default());
        assert!(matches!(
            result,
            Err(crate::LoaderError::Store(StoreError::DuplicateElementCode { .. }))
        ));
    }

    #[test]
    fn test_load_lenient_skips_bad_rows() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_fixture(
            dir.path(),
            "id\tversionId\tcode\tvalue\n1\t1\tJ00\tTest Value 1.0\nx\t1\tJ01\tBad id\n3\t99\tJ02\tNo version\n",
        );

        let mut store = RefbookStore::new();
        let stats = store.load_all(&files, &LoaderConfig::lenient()).unwrap();
        assert_eq!(stats.elements, 1);
        assert_eq!(stats.skipped, 2);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_element_load_matches_sequential_on_bad_rows() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_fixture(
            dir.path(),
            &b"id\tversionId\tcode\tvalue\n\
               1\t1\tJ00\t\xff\xfe\n\
               2\t1\tJ01\tB\n\
               3\t2\tJ01\tC\textra\n\
               \t\t\t\n\
               4\t2\tJ02\tD\r\n"[..],
        );
        let config = LoaderConfig::lenient();
        let element_file = files.element_file.clone().unwrap();

        let load = |parallel: bool| {
            let mut store = RefbookStore::new();
            store.load_refbooks(files.refbook_file.as_ref().unwrap(), &config).unwrap();
            store.load_versions(files.version_file.as_ref().unwrap(), &config).unwrap();
            let counts = if parallel {
                store.load_elements_parallel(&element_file, &config).unwrap()
            } else {
                store.load_elements(&element_file, &config).unwrap()
            };
            let codes: Vec<(VersionId, String)> = store
                .elements(1)
                .chain(store.elements(2))
                .map(|e| (e.version_id, e.code.clone()))
                .collect();
            (counts, codes)
        };

        let sequential = load(false);
        let parallel = load(true);

        assert_eq!(sequential.0, (2, 2));
        assert_eq!(parallel, sequential);
        assert_eq!(
            parallel.1,
            vec![(1, "J01".to_string()), (2, "J02".to_string())]
        );
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_element_load_strict_fails_on_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let files = write_fixture(
            dir.path(),
            &b"id\tversionId\tcode\tvalue\n1\t1\tJ00\t\xff\n"[..],
        );

        let mut store = RefbookStore::new();
        let result = store.load_all(&files, &LoaderConfig::default());
        assert!(matches!(result, Err(crate::LoaderError::InvalidUtf8(_))));
    }
}
