//! Measurement assessment.
//!
//! Classifies every recorded value of a child against the chosen standard.
//! A standard without a table for some measurement type falls back to WHO;
//! when WHO has nothing either, the entry says so instead of guessing.

use std::fmt;

use growth_model::{
    AgeInDays, BandInterval, CalendarDate, Child, Gender, MeasurementType, ReferenceTable,
    Standard,
};
use growth_standards::ReferenceProvider;
use serde::Serialize;
use tracing::{debug, warn};

use crate::age::format_age;
use crate::classify::classify;
use crate::error::Result;

/// Standard used when the requested one has no table.
pub const FALLBACK_STANDARD: Standard = Standard::Who;

/// A table resolved for a (measurement, gender, standard) request.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedTable<'a> {
    pub table: &'a ReferenceTable,
    /// The requested standard had no table and WHO was used instead.
    pub fallback: bool,
}

/// Look up a table, falling back to WHO when the requested standard has none.
///
/// Returns `Ok(None)` when neither standard has a table.
///
/// # Errors
///
/// Propagates provider errors other than not-found.
pub fn resolve_table<P: ReferenceProvider + ?Sized>(
    provider: &P,
    measurement: MeasurementType,
    gender: Gender,
    standard: Standard,
) -> Result<Option<ResolvedTable<'_>>> {
    match provider.lookup(measurement, gender, standard) {
        Ok(table) => return Ok(Some(ResolvedTable { table, fallback: false })),
        Err(err) if err.is_not_found() => {}
        Err(err) => return Err(err.into()),
    }
    if standard == FALLBACK_STANDARD {
        return Ok(None);
    }

    warn!(
        measurement = %measurement,
        gender = %gender,
        requested = %standard,
        fallback = %FALLBACK_STANDARD,
        "no reference table for requested standard, falling back"
    );
    match provider.lookup(measurement, gender, FALLBACK_STANDARD) {
        Ok(table) => Ok(Some(ResolvedTable { table, fallback: true })),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err.into()),
    }
}

/// Result of classifying one value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum AssessmentOutcome {
    Classified {
        /// Standard whose table was actually used.
        standard: Standard,
        interval: BandInterval,
        fallback: bool,
    },
    NoChart,
}

impl fmt::Display for AssessmentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssessmentOutcome::Classified {
                standard,
                interval,
                fallback: true,
            } => write!(f, "{interval} ({standard} fallback)"),
            AssessmentOutcome::Classified { interval, .. } => write!(f, "{interval}"),
            AssessmentOutcome::NoChart => f.write_str("no chart available"),
        }
    }
}

/// One classified value of one measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub measurement_id: String,
    pub date: CalendarDate,
    pub age: AgeInDays,
    pub age_label: String,
    pub measurement: MeasurementType,
    pub value: f64,
    pub outcome: AssessmentOutcome,
}

/// Assess a single value.
pub fn assess_value<P: ReferenceProvider + ?Sized>(
    provider: &P,
    measurement: MeasurementType,
    gender: Gender,
    standard: Standard,
    value: f64,
    age: AgeInDays,
) -> Result<AssessmentOutcome> {
    let Some(resolved) = resolve_table(provider, measurement, gender, standard)? else {
        debug!(%measurement, %gender, %standard, "no chart available");
        return Ok(AssessmentOutcome::NoChart);
    };
    let interval = classify(value, age, resolved.table)?;
    Ok(AssessmentOutcome::Classified {
        standard: resolved.table.standard(),
        interval,
        fallback: resolved.fallback,
    })
}

/// Assess every recorded value of `child`, in measurement date order and
/// then by measurement type.
///
/// # Errors
///
/// Fails only on a registered table with no rows.
/// Missing tables are reported per entry, not as errors.
pub fn assess_child<P: ReferenceProvider + ?Sized>(
    provider: &P,
    child: &Child,
    standard: Standard,
) -> Result<Vec<Assessment>> {
    let mut assessments = Vec::new();
    for measurement in &child.measurements {
        for kind in MeasurementType::ALL {
            let Some(value) = measurement.value(kind) else {
                continue;
            };
            let outcome = assess_value(
                provider,
                kind,
                child.gender,
                standard,
                value,
                measurement.age_in_days,
            )?;
            assessments.push(Assessment {
                measurement_id: measurement.id.clone(),
                date: measurement.date,
                age: measurement.age_in_days,
                age_label: format_age(measurement.age_in_days),
                measurement: kind,
                value,
                outcome,
            });
        }
    }
    debug!(
        child = %child.id,
        %standard,
        entries = assessments.len(),
        "assessed child measurements"
    );
    Ok(assessments)
}
