//! Data model for growth charts.
//!
//! - [`enums`]: measurement types, genders, standards and their band schemas
//! - [`date`]: calendar dates and ages in days
//! - [`reference`]: reference tables, rows and classification intervals
//! - [`child`]: child and measurement records

pub mod child;
pub mod date;
pub mod enums;
pub mod error;
pub mod reference;

pub use child::{Child, Measurement, MeasurementValues};
pub use date::{AgeInDays, CalendarDate, MIN_DISPLAY_YEAR};
pub use enums::{Band, Gender, MeasurementType, Standard};
pub use error::{ModelError, Result};
pub use reference::{BandInterval, ReferenceRow, ReferenceTable, TableKey};
