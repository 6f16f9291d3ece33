//! Version file parser.
//!
//! Parses `versions*.tsv` data files.

use csv::StringRecord;
use refbook_types::Version;

use crate::parser::{parse, TsvRecord};
use crate::types::LoaderResult;

/// Expected columns in a versions file.
const VERSION_COLUMNS: &[&str] = &["id", "refbookId", "version", "dateStart"];

impl TsvRecord for Version {
    const EXPECTED_COLUMNS: &'static [&'static str] = VERSION_COLUMNS;

    fn from_record(record: &StringRecord) -> LoaderResult<Self> {
        Ok(Version {
            id: parse::id(record.get(0).unwrap_or(""))?,
            refbook_id: parse::id(record.get(1).unwrap_or(""))?,
            version: parse::required("version", record.get(2).unwrap_or(""))?,
            date_start: parse::date(record.get(3).unwrap_or(""))?,
        })
    }
}
