//! CSV serialization of flat records
//!
//! Every field is quoted, embedded quotes are doubled, and rows (header
//! included) are joined with CRLF. Nothing follows the last row. Columns come
//! from the first record.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::{ExportError, Result};
use crate::types::{ApplicationRecord, FlatRecord};

/// Serialize `records` to CSV text
///
/// An empty slice produces an empty string. Values that are missing from a
/// later record, or null, are written as empty fields.
pub fn to_csv(records: &[FlatRecord]) -> Result<String> {
    let Some(first) = records.first() else {
        return Ok(String::new());
    };
    let columns: Vec<&str> = first.keys().collect();

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::CRLF)
        .double_quote(true)
        .from_writer(Vec::new());

    writer
        .write_record(&columns)
        .map_err(ExportError::Csv)?;

    for record in records {
        let row = columns.iter().map(|column| record.get(column).unwrap_or(""));
        writer.write_record(row).map_err(ExportError::Csv)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;

    let mut text = String::from_utf8(bytes)
        .map_err(|e| ExportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;

    // The writer terminates every row; only separators are wanted
    if text.ends_with("\r\n") {
        text.truncate(text.len() - 2);
    }

    Ok(text)
}

/// Serialize application records, one row per record, in column order
pub fn applications_to_csv(records: &[ApplicationRecord]) -> Result<String> {
    let rows: Vec<FlatRecord> = records.iter().map(FlatRecord::from).collect();
    to_csv(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, Option<&str>)]) -> FlatRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
            .collect()
    }

    #[test]
    fn test_empty_input_is_empty_output() {
        assert_eq!(to_csv(&[]).unwrap(), "");
        assert_eq!(applications_to_csv(&[]).unwrap(), "");
    }

    #[test]
    fn test_header_and_rows_quoted_with_crlf() {
        let records = vec![
            row(&[("name", Some("Ann")), ("city", Some("Chiang Mai"))]),
            row(&[("name", Some("Bo")), ("city", Some("Phuket"))]),
        ];
        let csv = to_csv(&records).unwrap();
        assert_eq!(
            csv,
            "\"name\",\"city\"\r\n\"Ann\",\"Chiang Mai\"\r\n\"Bo\",\"Phuket\""
        );
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let records = vec![row(&[("note", Some("She said \"hi\""))])];
        let csv = to_csv(&records).unwrap();
        assert_eq!(csv, "\"note\"\r\n\"She said \"\"hi\"\"\"");
    }

    #[test]
    fn test_null_and_missing_values_are_empty() {
        let records = vec![
            row(&[("a", Some("1")), ("b", None)]),
            row(&[("a", Some("2"))]),
        ];
        let csv = to_csv(&records).unwrap();
        assert_eq!(csv, "\"a\",\"b\"\r\n\"1\",\"\"\r\n\"2\",\"\"");
        assert!(!csv.contains("null"));
    }

    #[test]
    fn test_columns_follow_first_record_only() {
        let records = vec![
            row(&[("b", Some("x")), ("a", Some("y"))]),
            row(&[("a", Some("1")), ("b", Some("2")), ("c", Some("3"))]),
        ];
        let csv = to_csv(&records).unwrap();
        assert_eq!(csv, "\"b\",\"a\"\r\n\"x\",\"y\"\r\n\"2\",\"1\"");
    }

    #[test]
    fn test_split_on_crlf_reconstructs_values() {
        let records = vec![
            row(&[("first", Some("Somchai")), ("last", Some("Jaidee")), ("area", Some("Bangkok"))]),
            row(&[("first", Some("Malee")), ("last", Some("Suksan")), ("area", Some("Khon Kaen"))]),
        ];
        let csv = to_csv(&records).unwrap();

        let lines: Vec<Vec<String>> = csv
            .split("\r\n")
            .map(|line| line.split(',').map(|f| f.trim_matches('"').to_string()).collect())
            .collect();

        assert_eq!(lines[0], vec!["first", "last", "area"]);
        assert_eq!(lines[1], vec!["Somchai", "Jaidee", "Bangkok"]);
        assert_eq!(lines[2], vec!["Malee", "Suksan", "Khon Kaen"]);
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_commas_and_newlines_stay_inside_quotes() {
        let records = vec![row(&[("address", Some("12 Moo 3,\nSukhumvit"))])];
        let csv = to_csv(&records).unwrap();
        assert_eq!(csv, "\"address\"\r\n\"12 Moo 3,\nSukhumvit\"");
    }

    #[test]
    fn test_application_records_use_record_key_order() {
        let record = ApplicationRecord {
            submitted_at: "2024-06-15T08:30:00.000Z".to_string(),
            work_area: "Bangkok".to_string(),
            role1: "Barista".to_string(),
            ..Default::default()
        };
        let csv = applications_to_csv(&[record]).unwrap();
        let header = csv.split("\r\n").next().unwrap();
        assert!(header.starts_with("\"submittedAt\",\"workArea\",\"role1\",\"role2\""));
        assert!(header.ends_with("\"driverLicense\",\"resumeName\""));
        assert!(csv.contains("\"2024-06-15T08:30:00.000Z\",\"Bangkok\",\"Barista\",\"\""));
    }
}
