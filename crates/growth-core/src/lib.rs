//! Percentile engine for child growth charts.
//!
//! - [`age`]: age in days between two dates, and its display form
//! - [`interpolate`]: reference rows at arbitrary ages
//! - [`classify`]: percentile band of an observed value
//! - [`chart`]: curve and measurement series for drawing a chart
//! - [`assessment`]: classification of a child's recorded values
//!
//! Every operation is pure and takes its reference table by shared
//! reference, so one registry can serve any number of threads.
//!
//! # Example
//!
//! ```rust,ignore
//! use growth_core::{age_in_days, classify};
//! use growth_model::{CalendarDate, Gender, MeasurementType, Standard};
//! use growth_standards::embedded_registry;
//!
//! let table = embedded_registry()?.lookup(MeasurementType::Height, Gender::Male, Standard::Who)?;
//! let age = age_in_days(CalendarDate::parse_iso("2024-01-01")?, CalendarDate::parse_iso("2024-01-16")?);
//! println!("{}", classify(52.3, age, table)?);
//! ```

pub mod age;
pub mod assessment;
pub mod chart;
pub mod classify;
pub mod error;
pub mod interpolate;

pub use age::{age_in_days, format_age, measurement_for};
pub use assessment::{
    Assessment, AssessmentOutcome, FALLBACK_STANDARD, ResolvedTable, assess_child, assess_value,
    resolve_table,
};
pub use chart::{AgeAxis, ChartSeries, CurvePoint, MeasuredPoint, build_chart, curve};
pub use classify::{classify, classify_row};
pub use error::{GrowthError, Result};
pub use interpolate::{interpolate, interpolate_band};
