//! Reference table CSV loading.
//!
//! The first column is `age_days`; every other column is a band label from
//! the table's standard (`3rd`, `91st`, `99.6th`, ...). Empty cells leave the
//! band undefined for that row.

use std::io::Cursor;
use std::path::Path;

use growth_model::{AgeInDays, Band, ReferenceRow, ReferenceTable, TableKey};
use tracing::{debug, warn};

use crate::error::{Result, StandardsError};

/// Name of the age column.
pub const AGE_COLUMN: &str = "age_days";

/// Parse one reference table from CSV content.
///
/// `file` only labels errors and log lines.
pub fn parse_table(key: TableKey, file: &str, content: &str) -> Result<ReferenceTable> {
    let cursor = Cursor::new(content.as_bytes());
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(cursor);

    let headers = reader
        .headers()
        .map_err(|e| csv_error(file, &e))?
        .clone();
    let columns = parse_header(key, file, &headers)?;

    let mut rows: Vec<ReferenceRow> = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| csv_error(file, &e))?;
        let raw_age = record.get(0).unwrap_or_default();
        if raw_age.is_empty() {
            continue;
        }
        let age: u32 = raw_age.parse().map_err(|_| StandardsError::InvalidValue {
            field: AGE_COLUMN.to_string(),
            value: raw_age.to_string(),
            file: file.to_string(),
        })?;
        if let Some(previous) = rows.last()
            && previous.age.days() >= age
        {
            return Err(StandardsError::UnsortedRows {
                file: file.to_string(),
                age,
            });
        }

        let mut row = ReferenceRow::new(AgeInDays::new(age));
        for (index, band) in &columns {
            let raw = record.get(*index).unwrap_or_default();
            if raw.is_empty() {
                continue;
            }
            let value: f64 = raw
                .parse()
                .ok()
                .filter(|v: &f64| v.is_finite())
                .ok_or_else(|| StandardsError::InvalidValue {
                    field: band.label().to_string(),
                    value: raw.to_string(),
                    file: file.to_string(),
                })?;
            row.insert(*band, value);
        }
        rows.push(row);
    }

    if rows.is_empty() {
        warn!(table = %key, file, "reference table has no rows");
    } else {
        debug!(table = %key, file, rows = rows.len(), "parsed reference table");
    }
    Ok(ReferenceTable::new(key, rows))
}

/// Read and parse one reference table from disk.
pub fn load_table(key: TableKey, path: &Path) -> Result<ReferenceTable> {
    let content = std::fs::read_to_string(path).map_err(|source| StandardsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_table(key, &path.display().to_string(), &content)
}

/// Map header columns to bands, checking each against the standard's schema.
fn parse_header(key: TableKey, file: &str, headers: &csv::StringRecord) -> Result<Vec<(usize, Band)>> {
    match headers.get(0) {
        Some(first) if first.eq_ignore_ascii_case(AGE_COLUMN) => {}
        other => {
            return Err(StandardsError::CsvParse {
                file: file.to_string(),
                message: format!(
                    "first column must be '{AGE_COLUMN}', found '{}'",
                    other.unwrap_or_default()
                ),
            });
        }
    }

    let mut columns = Vec::with_capacity(headers.len().saturating_sub(1));
    for (index, label) in headers.iter().enumerate().skip(1) {
        let band = label
            .parse::<Band>()
            .ok()
            .filter(|band| key.standard.has_band(*band))
            .ok_or_else(|| StandardsError::UnknownBand {
                label: label.to_string(),
                standard: key.standard,
                file: file.to_string(),
            })?;
        columns.push((index, band));
    }
    Ok(columns)
}

fn csv_error(file: &str, error: &csv::Error) -> StandardsError {
    StandardsError::CsvParse {
        file: file.to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use growth_model::{Gender, MeasurementType, Standard};

    fn who_height() -> TableKey {
        TableKey::new(MeasurementType::Height, Gender::Male, Standard::Who)
    }

    #[test]
    fn test_parse_partial_rows() {
        let csv = "age_days,3rd,50th,97th\n0,46.3,49.9,53.4\n30,,54.7,58.4\n";
        let table = parse_table(who_height(), "inline.csv", csv).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].get(Band::P3), Some(46.3));
        assert_eq!(table.rows()[1].get(Band::P3), None);
        assert_eq!(table.rows()[1].get(Band::P50), Some(54.7));
    }

    #[test]
    fn test_header_only_gives_empty_table() {
        let table = parse_table(who_height(), "empty.csv", "age_days,50th\n").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_rejects_band_from_other_standard() {
        let csv = "age_days,91st\n0,1.0\n";
        let err = parse_table(who_height(), "bad.csv", csv).unwrap_err();
        assert!(matches!(err, StandardsError::UnknownBand { ref label, .. } if label == "91st"));
    }

    #[test]
    fn test_rejects_unsorted_rows() {
        let csv = "age_days,50th\n30,54.7\n0,49.9\n";
        let err = parse_table(who_height(), "bad.csv", csv).unwrap_err();
        assert!(matches!(err, StandardsError::UnsortedRows { age: 0, .. }));
    }

    #[test]
    fn test_rejects_bad_age_and_value() {
        let err = parse_table(who_height(), "bad.csv", "age_days,50th\nx,49.9\n").unwrap_err();
        assert!(matches!(err, StandardsError::InvalidValue { ref field, .. } if field == "age_days"));

        let err = parse_table(who_height(), "bad.csv", "age_days,50th\n0,tall\n").unwrap_err();
        assert!(matches!(err, StandardsError::InvalidValue { ref field, .. } if field == "50th"));
    }

    #[test]
    fn test_rejects_missing_age_column() {
        let err = parse_table(who_height(), "bad.csv", "age,50th\n0,49.9\n").unwrap_err();
        assert!(matches!(err, StandardsError::CsvParse { .. }));
    }
}
