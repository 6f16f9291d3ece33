//! Element file parser.
//!
//! Parses `elements*.tsv` data files.

use csv::StringRecord;
use refbook_types::Element;

use crate::parser::{parse, TsvRecord};
use crate::types::LoaderResult;

/// Expected columns in an elements file.
pub(crate) const ELEMENT_COLUMNS: &[&str] = &["id", "versionId", "code", "value"];

impl TsvRecord for Element {
    const EXPECTED_COLUMNS: &'static [&'static str] = ELEMENT_COLUMNS;

    fn from_record(record: &StringRecord) -> LoaderResult<Self> {
        Ok(Element {
            id: parse::id(record.get(0).unwrap_or(""))?,
            version_id: parse::id(record.get(1).unwrap_or(""))?,
            code: parse::required("code", record.get(2).unwrap_or(""))?,
            value: parse::required("value", record.get(3).unwrap_or(""))?,
        })
    }
}

/// Parses a single raw element line (no header) split on tabs.
#[cfg(feature = "parallel")]
pub(crate) fn parse_element_line(line: &[u8]) -> LoaderResult<Element> {
    let line = std::str::from_utf8(line)?;
    let fields: Vec<&str> = line.trim_end_matches('\r').split('\t').collect();
    if fields.len() != ELEMENT_COLUMNS.len() {
        return Err(crate::types::LoaderError::FieldCount {
            expected: ELEMENT_COLUMNS.len(),
            found: fields.len(),
        });
    }

    Ok(Element {
        id: parse::id(fields[0])?,
        version_id: parse::id(fields[1])?,
        code: parse::required("code", fields[2])?,
        value: parse::required("value", fields[3])?,
    })
}

/// Returns true for lines the TSV reader skips: empty lines and rows whose
/// fields are all blank.
#[cfg(feature = "parallel")]
pub(crate) fn is_blank_line(line: &[u8]) -> bool {
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    line.is_empty()
        || (line.split(|b| *b == b'\t').count() == ELEMENT_COLUMNS.len()
            && line.iter().all(u8::is_ascii_whitespace))
}
