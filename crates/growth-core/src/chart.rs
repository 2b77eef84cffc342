//! Chart series for presentation layers.
//!
//! A chart combines the reference curves of one table with a child's
//! measured values on a shared x-axis. Charts of infants under a year use
//! months on the x-axis, otherwise years.

use std::collections::BTreeMap;

use growth_model::{
    AgeInDays, Band, CalendarDate, Measurement, MeasurementType, ReferenceRow, ReferenceTable,
    TableKey,
};
use serde::Serialize;

use crate::error::{GrowthError, Result};
use crate::interpolate::interpolate;

/// Average month length used to place ages on a month axis.
pub const AXIS_DAYS_PER_MONTH: f64 = 30.44;

/// Average year length used to place ages on a year axis.
pub const AXIS_DAYS_PER_YEAR: f64 = 365.0;

/// Unit of the chart's x-axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgeAxis {
    Months,
    Years,
}

impl AgeAxis {
    /// Months when the oldest age plotted is under a year.
    pub fn for_max_age(max_age: AgeInDays) -> Self {
        if max_age.days() < 365 {
            AgeAxis::Months
        } else {
            AgeAxis::Years
        }
    }

    pub fn divisor(&self) -> f64 {
        match self {
            AgeAxis::Months => AXIS_DAYS_PER_MONTH,
            AgeAxis::Years => AXIS_DAYS_PER_YEAR,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            AgeAxis::Months => "months",
            AgeAxis::Years => "years",
        }
    }

    /// Position of `age` on this axis.
    pub fn position(&self, age: AgeInDays) -> f64 {
        age.as_f64() / self.divisor()
    }
}

/// One sample of the reference curves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurvePoint {
    pub x: f64,
    pub age: AgeInDays,
    pub values: BTreeMap<Band, f64>,
}

/// One measured value of the child.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasuredPoint {
    pub x: f64,
    pub age: AgeInDays,
    pub date: CalendarDate,
    pub measurement_id: String,
    pub value: f64,
}

/// Everything needed to draw one growth chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub key: TableKey,
    pub axis: AgeAxis,
    pub bands: Vec<Band>,
    pub curves: Vec<CurvePoint>,
    pub points: Vec<MeasuredPoint>,
}

impl ChartSeries {
    /// Chart title, e.g. `Height - WHO Percentiles`.
    pub fn title(&self) -> String {
        format!(
            "{} - {} Percentiles",
            self.key.measurement.title(),
            self.key.standard
        )
    }

    /// Y-axis label, e.g. `Weight (kg)`.
    pub fn y_label(&self) -> String {
        y_label(self.key.measurement)
    }

    /// X-axis label, e.g. `Age (months)`.
    pub fn x_label(&self) -> String {
        format!("Age ({})", self.axis.unit())
    }
}

pub fn y_label(measurement: MeasurementType) -> String {
    format!("{} ({})", measurement.title(), measurement.unit())
}

/// Build chart series from a table's rows and the measurements carrying a
/// value for the table's measurement type.
///
/// # Errors
///
/// Returns [`GrowthError::EmptyTable`] if `table` has no rows.
pub fn build_chart(table: &ReferenceTable, measurements: &[Measurement]) -> Result<ChartSeries> {
    let key = table.key();
    let Some(last) = table.last() else {
        return Err(GrowthError::EmptyTable { key });
    };

    let relevant: Vec<(&Measurement, f64)> = measurements
        .iter()
        .filter_map(|m| m.value(key.measurement).map(|v| (m, v)))
        .collect();

    let max_age = relevant
        .iter()
        .map(|(m, _)| m.age_in_days)
        .max()
        .unwrap_or(last.age);
    let axis = AgeAxis::for_max_age(max_age);

    let curves = table
        .rows()
        .iter()
        .map(|row| curve_point(axis, row))
        .collect();

    let mut points: Vec<MeasuredPoint> = relevant
        .into_iter()
        .map(|(m, value)| MeasuredPoint {
            x: axis.position(m.age_in_days),
            age: m.age_in_days,
            date: m.date,
            measurement_id: m.id.clone(),
            value,
        })
        .collect();
    points.sort_by(|a, b| a.x.total_cmp(&b.x));

    Ok(ChartSeries {
        key,
        axis,
        bands: table.bands().to_vec(),
        curves,
        points,
    })
}

/// Sample the interpolated curves every `step` days from the first to the
/// last tabulated age, always including the last age.
///
/// A `step` of zero is treated as one day.
pub fn curve(table: &ReferenceTable, step: u32) -> Result<Vec<ReferenceRow>> {
    let (Some(first), Some(last)) = (table.first(), table.last()) else {
        return Err(GrowthError::EmptyTable { key: table.key() });
    };
    let step = step.max(1);
    let end = last.age.days();

    let mut ages: Vec<u32> = (first.age.days()..=end).step_by(step as usize).collect();
    if ages.last() != Some(&end) {
        ages.push(end);
    }
    ages.into_iter()
        .map(|age| interpolate(AgeInDays::new(age), table))
        .collect()
}

fn curve_point(axis: AgeAxis, row: &ReferenceRow) -> CurvePoint {
    CurvePoint {
        x: axis.position(row.age),
        age: row.age,
        values: row.values.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use growth_model::{Gender, MeasurementValues, Standard};

    fn table() -> ReferenceTable {
        ReferenceTable::new(
            TableKey::new(MeasurementType::Weight, Gender::Female, Standard::Who),
            vec![
                ReferenceRow::new(AgeInDays::new(0)).with(Band::P50, 3.2),
                ReferenceRow::new(AgeInDays::new(365)).with(Band::P50, 8.9),
                ReferenceRow::new(AgeInDays::new(730)).with(Band::P50, 11.5),
            ],
        )
    }

    fn weight(id: &str, age: u32, value: Option<f64>) -> Measurement {
        Measurement::new(
            id,
            CalendarDate::from_ymd(2024, 1, 1).unwrap(),
            AgeInDays::new(age),
            MeasurementValues {
                weight: value,
                ..Default::default()
            },
        )
    }

    #[test]
    fn test_axis_months_for_infants() {
        let chart = build_chart(&table(), &[weight("a", 200, Some(7.0))]).unwrap();
        assert_eq!(chart.axis, AgeAxis::Months);
        assert!((chart.points[0].x - 200.0 / 30.44).abs() < 1e-12);
        assert_eq!(chart.x_label(), "Age (months)");
    }

    #[test]
    fn test_axis_years_from_measurements() {
        let chart = build_chart(&table(), &[weight("a", 365, Some(9.0))]).unwrap();
        assert_eq!(chart.axis, AgeAxis::Years);
        assert_eq!(chart.curves[2].x, 2.0);
    }

    #[test]
    fn test_axis_from_table_without_measurements() {
        let chart = build_chart(&table(), &[]).unwrap();
        assert_eq!(chart.axis, AgeAxis::Years);
        assert!(chart.points.is_empty());
        assert_eq!(chart.curves.len(), 3);
    }

    #[test]
    fn test_points_skip_missing_values_and_sort() {
        let measurements = [
            weight("late", 300, Some(8.0)),
            weight("none", 100, None),
            weight("early", 30, Some(4.0)),
        ];
        let chart = build_chart(&table(), &measurements).unwrap();
        let ids: Vec<&str> = chart
            .points
            .iter()
            .map(|p| p.measurement_id.as_str())
            .collect();
        assert_eq!(ids, vec!["early", "late"]);
    }

    #[test]
    fn test_titles() {
        let chart = build_chart(&table(), &[]).unwrap();
        assert_eq!(chart.title(), "Weight - WHO Percentiles");
        assert_eq!(chart.y_label(), "Weight (kg)");
        assert_eq!(y_label(MeasurementType::HeadCircumference), "Head Circumference (cm)");
    }

    #[test]
    fn test_sample_curve_includes_last_age() {
        let rows = curve(&table(), 300).unwrap();
        let ages: Vec<u32> = rows.iter().map(|r| r.age.days()).collect();
        assert_eq!(ages, vec![0, 300, 600, 730]);
    }

    #[test]
    fn test_empty_table() {
        let empty = ReferenceTable::new(table().key(), vec![]);
        assert!(matches!(
            build_chart(&empty, &[]),
            Err(GrowthError::EmptyTable { .. })
        ));
        assert!(matches!(
            curve(&empty, 30),
            Err(GrowthError::EmptyTable { .. })
        ));
    }
}
