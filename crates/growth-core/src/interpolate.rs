//! Piecewise-linear interpolation of reference tables.
//!
//! Ages at or beyond either end of a table clamp to the end row; there is no
//! extrapolation. Inside the table the two bracketing rows are blended per
//! band. A band absent from either bracketing row is absent from the result.

use growth_model::{AgeInDays, Band, ReferenceRow, ReferenceTable};
use tracing::trace;

use crate::error::{GrowthError, Result};

/// Reference row at exactly `age`.
///
/// # Errors
///
/// Returns [`GrowthError::EmptyTable`] if `table` has no rows.
pub fn interpolate(age: AgeInDays, table: &ReferenceTable) -> Result<ReferenceRow> {
    let rows = table.rows();
    let (Some(first), Some(last)) = (rows.first(), rows.last()) else {
        return Err(GrowthError::EmptyTable { key: table.key() });
    };

    if age <= first.age {
        return Ok(first.clone());
    }
    if age >= last.age {
        return Ok(last.clone());
    }

    // first.age < age < last.age, so 1 <= upper <= rows.len() - 1.
    let upper = rows.partition_point(|row| row.age < age);
    let upper_row = &rows[upper];
    if upper_row.age == age {
        return Ok(upper_row.clone());
    }
    let lower_row = &rows[upper - 1];

    trace!(
        table = %table.key(),
        age = age.days(),
        lower = lower_row.age.days(),
        upper = upper_row.age.days(),
        "interpolating between rows"
    );
    Ok(blend(age, lower_row, upper_row))
}

/// Interpolated value of a single band at `age`, if the band is defined there.
pub fn interpolate_band(age: AgeInDays, band: Band, table: &ReferenceTable) -> Result<Option<f64>> {
    Ok(interpolate(age, table)?.get(band))
}

/// Linear blend of two rows with `lower.age < age < upper.age`.
fn blend(age: AgeInDays, lower: &ReferenceRow, upper: &ReferenceRow) -> ReferenceRow {
    let span = upper.age.as_f64() - lower.age.as_f64();
    let ratio = (age.as_f64() - lower.age.as_f64()) / span;

    let mut row = ReferenceRow::new(age);
    for (band, low) in &lower.values {
        if let Some(high) = upper.get(*band) {
            row.insert(*band, low + ratio * (high - low));
        }
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use growth_model::{Gender, MeasurementType, Standard, TableKey};

    fn key() -> TableKey {
        TableKey::new(MeasurementType::Height, Gender::Male, Standard::Who)
    }

    fn table(rows: Vec<ReferenceRow>) -> ReferenceTable {
        ReferenceTable::new(key(), rows)
    }

    fn row(age: u32, p50: f64) -> ReferenceRow {
        ReferenceRow::new(AgeInDays::new(age)).with(Band::P50, p50)
    }

    #[test]
    fn test_empty_table_fails() {
        let err = interpolate(AgeInDays::new(10), &table(vec![])).unwrap_err();
        assert!(matches!(err, GrowthError::EmptyTable { .. }));
    }

    #[test]
    fn test_single_row_table_clamps_everywhere() {
        let t = table(vec![row(30, 54.7)]);
        for age in [0, 30, 400] {
            assert_eq!(interpolate(AgeInDays::new(age), &t).unwrap(), row(30, 54.7));
        }
    }

    #[test]
    fn test_midpoint() {
        let t = table(vec![row(0, 49.9), row(30, 54.7), row(61, 58.4)]);
        let mid = interpolate(AgeInDays::new(15), &t).unwrap();
        assert_eq!(mid.age, AgeInDays::new(15));
        assert!((mid.get(Band::P50).unwrap() - 52.3).abs() < 1e-9);
    }

    #[test]
    fn test_exact_row_age_returns_row() {
        let t = table(vec![row(0, 49.9), row(30, 54.7), row(61, 58.4)]);
        assert_eq!(interpolate(AgeInDays::new(30), &t).unwrap(), row(30, 54.7));
    }

    #[test]
    fn test_band_missing_in_either_row_is_omitted() {
        let t = table(vec![
            row(0, 49.9).with(Band::P3, 46.3),
            row(30, 54.7).with(Band::P97, 58.4),
        ]);
        let mid = interpolate(AgeInDays::new(10), &t).unwrap();
        assert!(mid.get(Band::P50).is_some());
        assert_eq!(mid.get(Band::P3), None);
        assert_eq!(mid.get(Band::P97), None);
    }

    #[test]
    fn test_interpolate_band() {
        let t = table(vec![row(0, 10.0), row(10, 20.0)]);
        assert_eq!(
            interpolate_band(AgeInDays::new(4), Band::P50, &t).unwrap(),
            Some(14.0)
        );
        assert_eq!(interpolate_band(AgeInDays::new(4), Band::P3, &t).unwrap(), None);
    }
}
