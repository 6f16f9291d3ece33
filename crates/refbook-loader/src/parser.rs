//! Generic tab-separated file parser.
//!
//! Provides a streaming parser for refbook data files: one header row
//! followed by tab-delimited records.

use std::fs::File;
use std::io::{BufReader, Read};
use std::marker::PhantomData;
use std::path::Path;

use csv::{Reader, ReaderBuilder, StringRecord};

use crate::types::{LoaderError, LoaderResult};

/// Trait for types that can be parsed from data file records.
pub trait TsvRecord: Sized {
    /// Expected column names for this record type.
    const EXPECTED_COLUMNS: &'static [&'static str];

    /// Parse a record from a CSV StringRecord.
    fn from_record(record: &StringRecord) -> LoaderResult<Self>;
}

/// A streaming parser for tab-separated data files.
///
/// Records are read one at a time so large element files are never held
/// in memory as raw text.
pub struct TsvParser<R: Read, T: TsvRecord> {
    reader: Reader<R>,
    _marker: PhantomData<T>,
}

impl<T: TsvRecord> TsvParser<BufReader<File>, T> {
    /// Creates a new parser from a file path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or has invalid headers.
    pub fn from_path<P: AsRef<Path>>(path: P) -> LoaderResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(LoaderError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read, T: TsvRecord> TsvParser<R, T> {
    /// Creates a new parser from a reader.
    pub fn from_reader(reader: R) -> LoaderResult<Self> {
        let mut csv_reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(false)
            .quoting(false)
            .trim(csv::Trim::None)
            .from_reader(reader);

        Self::validate_headers(&mut csv_reader)?;

        Ok(Self {
            reader: csv_reader,
            _marker: PhantomData,
        })
    }

    /// Validates that the file has the expected column headers.
    fn validate_headers(reader: &mut Reader<R>) -> LoaderResult<()> {
        let headers = reader.headers()?;
        let expected = T::EXPECTED_COLUMNS;

        if headers.len() < expected.len() {
            return Err(LoaderError::InvalidHeader {
                expected: expected.len(),
                found: headers.len(),
            });
        }

        for (i, expected_col) in expected.iter().enumerate() {
            let found = headers.get(i).unwrap_or("");
            // UTF-8 BOM
            let found = found.trim_start_matches('\u{feff}');
            if found != *expected_col {
                return Err(LoaderError::UnexpectedColumn {
                    position: i,
                    expected: expected_col.to_string(),
                    found: found.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Parses all records into a Vec, stopping at the first malformed record.
    pub fn parse_all(self) -> LoaderResult<Vec<T>> {
        self.collect()
    }
}

impl<R: Read, T: TsvRecord> Iterator for TsvParser<R, T> {
    type Item = LoaderResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut record = StringRecord::new();
            match self.reader.read_record(&mut record) {
                Ok(true) => {
                    if record.is_empty() || record.iter().all(|f| f.trim().is_empty()) {
                        continue;
                    }

                    return Some(T::from_record(&record));
                }
                Ok(false) => return None,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// Helper functions for parsing data file field values.
pub mod parse {
    use chrono::NaiveDate;
    use refbook_types::DATE_FORMAT;

    use super::{LoaderError, LoaderResult};

    /// Parses a surrogate identifier.
    pub fn id(value: &str) -> LoaderResult<u32> {
        value.trim().parse::<u32>().map_err(|_| LoaderError::InvalidId {
            value: value.to_string(),
        })
    }

    /// Parses a calendar date in `YYYY-MM-DD` form.
    pub fn date(value: &str) -> LoaderResult<NaiveDate> {
        NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
            LoaderError::InvalidDate {
                value: value.to_string(),
            }
        })
    }

    /// Returns the value of a column that must not be blank.
    pub fn required(column: &'static str, value: &str) -> LoaderResult<String> {
        if value.trim().is_empty() {
            return Err(LoaderError::EmptyField { column });
        }
        Ok(value.to_string())
    }

    /// Returns the value of an optional text column.
    pub fn optional(value: Option<&str>) -> String {
        value.unwrap_or("").to_string()
    }
}
