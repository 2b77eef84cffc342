//! Percentile band classification.
//!
//! The walk order always comes from the table's own [`Standard`]: WHO and NHS
//! schemas have different lines, so a fixed list would misplace values.
//! A value equal to a line falls in the interval below that line, including
//! the highest line: only values strictly above every line are reported as
//! above it. A row with no populated line at all also reports above the
//! schema's highest line, so classification never fails on sparse tables.

use growth_model::{AgeInDays, BandInterval, ReferenceRow, ReferenceTable, Standard};

use crate::error::Result;
use crate::interpolate::interpolate;

/// Classify `value` measured at `age` against `table`.
///
/// # Errors
///
/// Returns [`GrowthError::EmptyTable`](crate::GrowthError::EmptyTable) if the
/// table has no rows.
pub fn classify(value: f64, age: AgeInDays, table: &ReferenceTable) -> Result<BandInterval> {
    let row = interpolate(age, table)?;
    Ok(classify_row(value, &row, table.standard()))
}

/// Classify `value` against an already interpolated row.
///
/// Bands missing from the row are skipped.
pub fn classify_row(value: f64, row: &ReferenceRow, standard: Standard) -> BandInterval {
    let mut previous = None;
    for &band in standard.bands() {
        let Some(line) = row.get(band) else {
            continue;
        };
        if value <= line {
            return match previous {
                None => BandInterval::Below { band },
                Some(lower) => BandInterval::Between { lower, upper: band },
            };
        }
        previous = Some(band);
    }
    BandInterval::Above {
        band: previous.unwrap_or_else(|| standard.highest_band()),
    }
}
