//! Loads the sample data directory shipped with the repository.

use std::path::PathBuf;

use chrono::NaiveDate;
use refbook_loader::{discover_refbook_files, LoaderConfig, RefbookStore};
use refbook_service::{FixedClock, RefbookServer};

fn sample_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

#[test]
fn test_sample_data_loads_and_resolves() {
    let files = discover_refbook_files(sample_data_dir()).unwrap();
    let mut store = RefbookStore::new();
    let stats = store.load_all(&files, &LoaderConfig::default()).unwrap();

    assert_eq!(stats.refbooks, 2);
    assert_eq!(stats.versions, 3);
    assert_eq!(stats.elements, 5);
    assert_eq!(stats.skipped, 0);
    assert_eq!(stats.total(), 10);

    let server = RefbookServer::new(store).with_clock(FixedClock(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));

    let current = server.get_elements(2, None).unwrap();
    let codes: Vec<&str> = current.iter().map(|e| e.code.as_str()).collect();
    assert_eq!(codes, vec!["J00", "J01", "J02"]);

    assert!(server
        .check_element(2, Some("J01"), Some("Острый синусит"), None)
        .unwrap());
    assert!(!server
        .check_element(2, Some("J01"), Some("Острый синусит"), Some("v1"))
        .unwrap());
}
