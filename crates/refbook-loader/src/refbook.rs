//! Refbook file parser.
//!
//! Parses `refbooks*.tsv` data files.

use csv::StringRecord;
use refbook_types::Refbook;

use crate::parser::{parse, TsvRecord};
use crate::types::LoaderResult;

/// Expected columns in a refbooks file.
const REFBOOK_COLUMNS: &[&str] = &["id", "code", "name", "description"];

impl TsvRecord for Refbook {
    const EXPECTED_COLUMNS: &'static [&'static str] = REFBOOK_COLUMNS;

    fn from_record(record: &StringRecord) -> LoaderResult<Self> {
        Ok(Refbook {
            id: parse::id(record.get(0).unwrap_or(""))?,
            code: parse::required("code", record.get(1).unwrap_or(""))?,
            name: parse::required("name", record.get(2).unwrap_or(""))?,
            description: parse::optional(record.get(3)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::TsvParser;

    #[test]
    fn test_parse_refbook_record() {
        let record = StringRecord::from(vec!["2", "ICD-10", "МКБ-10", "Классификатор болезней"]);

        let refbook = Refbook::from_record(&record).unwrap();
        assert_eq!(refbook.id, 2);
        assert_eq!(refbook.code, "ICD-10");
        assert_eq!(refbook.name, "МКБ-10");
        assert_eq!(refbook.description, "Классификатор болезней");
    }

    #[test]
    fn test_parse_refbook_with_empty_description() {
        let data = "id\tcode\tname\tdescription\n1\tMS1\tСпециальности\t\n";
        let refbooks = TsvParser::<_, Refbook>::from_reader(data.as_bytes())
            .unwrap()
            .parse_all()
            .unwrap();

        assert_eq!(refbooks.len(), 1);
        assert!(refbooks[0].description.is_empty());
    }

    #[test]
    fn test_reject_refbook_without_code() {
        let record = StringRecord::from(vec!["1", "", "Name", ""]);
        assert!(Refbook::from_record(&record).is_err());
    }
}
