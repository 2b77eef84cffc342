//! Reference data provider trait.
//!
//! Consumers such as measurement assessment only need to resolve a table for
//! a (measurement, gender, standard) triple. The [`ReferenceProvider`] trait
//! keeps them independent of how tables were loaded, so tests can supply a
//! hand-built registry.

use growth_model::{Gender, MeasurementType, ReferenceTable, Standard};

use crate::error::Result;
use crate::registry::ReferenceRegistry;

/// Source of reference tables.
pub trait ReferenceProvider {
    /// Table for the exact triple.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StandardsError::NotFound`] when the triple has no table.
    fn lookup(
        &self,
        measurement: MeasurementType,
        gender: Gender,
        standard: Standard,
    ) -> Result<&ReferenceTable>;
}

impl ReferenceProvider for ReferenceRegistry {
    fn lookup(
        &self,
        measurement: MeasurementType,
        gender: Gender,
        standard: Standard,
    ) -> Result<&ReferenceTable> {
        ReferenceRegistry::lookup(self, measurement, gender, standard)
    }
}

impl<P: ReferenceProvider + ?Sized> ReferenceProvider for &P {
    fn lookup(
        &self,
        measurement: MeasurementType,
        gender: Gender,
        standard: Standard,
    ) -> Result<&ReferenceTable> {
        (**self).lookup(measurement, gender, standard)
    }
}
