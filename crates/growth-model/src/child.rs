//! Child and measurement records.
//!
//! These are the records the storage layer persists. Field names follow the
//! stored JSON layout (`dateOfBirth`, `ageInDays`, `headCircumference`).

use serde::{Deserialize, Serialize};

use crate::date::{AgeInDays, CalendarDate};
use crate::enums::{Gender, MeasurementType};

/// Values taken at one sitting. At least one is normally present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_circumference: Option<f64>,
}

impl MeasurementValues {
    pub fn get(&self, measurement: MeasurementType) -> Option<f64> {
        match measurement {
            MeasurementType::Height => self.height,
            MeasurementType::Weight => self.weight,
            MeasurementType::HeadCircumference => self.head_circumference,
        }
    }

    pub fn set(&mut self, measurement: MeasurementType, value: Option<f64>) {
        match measurement {
            MeasurementType::Height => self.height = value,
            MeasurementType::Weight => self.weight = value,
            MeasurementType::HeadCircumference => self.head_circumference = value,
        }
    }

    pub fn is_empty(&self) -> bool {
        MeasurementType::ALL.iter().all(|m| self.get(*m).is_none())
    }
}

/// One dated set of measurements, with the child's age cached at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub id: String,
    pub date: CalendarDate,
    pub age_in_days: AgeInDays,
    #[serde(flatten)]
    pub values: MeasurementValues,
}

impl Measurement {
    pub fn new(
        id: impl Into<String>,
        date: CalendarDate,
        age_in_days: AgeInDays,
        values: MeasurementValues,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            age_in_days,
            values,
        }
    }

    pub fn value(&self, measurement: MeasurementType) -> Option<f64> {
        self.values.get(measurement)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: String,
    pub name: String,
    pub date_of_birth: CalendarDate,
    pub gender: Gender,
    #[serde(default)]
    pub measurements: Vec<Measurement>,
}

impl Child {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        date_of_birth: CalendarDate,
        gender: Gender,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date_of_birth,
            gender,
            measurements: Vec::new(),
        }
    }

    /// Adds a measurement, keeping the list ordered by date.
    ///
    /// Measurements on the same date keep their insertion order.
    pub fn add_measurement(&mut self, measurement: Measurement) {
        let index = self
            .measurements
            .partition_point(|m| m.date <= measurement.date);
        self.measurements.insert(index, measurement);
    }

    /// Removes a measurement by id, returning it if it existed.
    pub fn remove_measurement(&mut self, id: &str) -> Option<Measurement> {
        let index = self.measurements.iter().position(|m| m.id == id)?;
        Some(self.measurements.remove(index))
    }

    /// Measurements carrying a value for `measurement`, in date order.
    pub fn measurements_of(
        &self,
        measurement: MeasurementType,
    ) -> impl Iterator<Item = (&Measurement, f64)> + '_ {
        self.measurements
            .iter()
            .filter_map(move |m| m.value(measurement).map(|v| (m, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> CalendarDate {
        CalendarDate::parse_iso(s).unwrap()
    }

    fn measurement(id: &str, on: &str) -> Measurement {
        Measurement::new(
            id,
            date(on),
            AgeInDays::ZERO,
            MeasurementValues {
                height: Some(50.0),
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_add_measurement_keeps_date_order() {
        let mut child = Child::new("c1", "Ada", date("2024-01-01"), Gender::Female);
        child.add_measurement(measurement("b", "2024-03-01"));
        child.add_measurement(measurement("a", "2024-02-01"));
        child.add_measurement(measurement("c", "2024-03-01"));
        let ids: Vec<&str> = child.measurements.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_remove_measurement() {
        let mut child = Child::new("c1", "Ada", date("2024-01-01"), Gender::Female);
        child.add_measurement(measurement("a", "2024-02-01"));
        assert!(child.remove_measurement("missing").is_none());
        assert_eq!(child.remove_measurement("a").unwrap().id, "a");
        assert!(child.measurements.is_empty());
    }

    #[test]
    fn test_measurements_of_skips_missing_values() {
        let mut child = Child::new("c1", "Ada", date("2024-01-01"), Gender::Female);
        child.add_measurement(measurement("a", "2024-02-01"));
        assert_eq!(child.measurements_of(MeasurementType::Height).count(), 1);
        assert_eq!(child.measurements_of(MeasurementType::Weight).count(), 0);
    }
}
