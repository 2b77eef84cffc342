//! Property and scenario tests for the percentile engine.

use growth_core::{
    AgeAxis, AssessmentOutcome, age_in_days, assess_child, build_chart, classify, curve,
    format_age, interpolate, measurement_for,
};
use growth_model::{
    AgeInDays, Band, BandInterval, CalendarDate, Child, Gender, MeasurementType,
    MeasurementValues, ReferenceRow, ReferenceTable, Standard, TableKey,
};
use growth_standards::embedded_registry;
use proptest::prelude::*;

fn who_height_boys() -> &'static ReferenceTable {
    embedded_registry()
        .expect("load registry")
        .lookup(MeasurementType::Height, Gender::Male, Standard::Who)
        .expect("WHO height boys")
}

fn date(s: &str) -> CalendarDate {
    CalendarDate::parse_iso(s).unwrap()
}

fn embedded_tables() -> Vec<&'static ReferenceTable> {
    embedded_registry()
        .expect("load registry")
        .tables()
        .collect()
}

#[test]
fn age_examples() {
    assert_eq!(age_in_days(date("2024-01-01"), date("2024-01-02")).days(), 1);
    assert_eq!(age_in_days(date("2024-01-15"), date("2024-02-15")).days(), 31);
    assert_eq!(age_in_days(date("2023-01-01"), date("2024-01-01")).days(), 365);
}

#[test]
fn format_examples() {
    let cases = [
        (1, "1 day"),
        (29, "29 days"),
        (30, "1 month"),
        (35, "1m 5d"),
        (365, "1 year"),
        (395, "1y 1m"),
    ];
    for (days, expected) in cases {
        assert_eq!(format_age(AgeInDays::new(days)), expected);
    }
}

#[test]
fn who_height_boys_midpoint_scenario() {
    let table = who_height_boys();
    let row = interpolate(AgeInDays::new(15), table).unwrap();
    let p50 = row.get(Band::P50).unwrap();
    assert!((p50 - 52.3).abs() < 1e-9, "p50 at 15 days was {p50}");

    let p25 = row.get(Band::P25).unwrap();
    let p75 = row.get(Band::P75).unwrap();
    let interval = classify(52.3, AgeInDays::new(15), table).unwrap();
    let expected = if 52.3 <= p50 {
        BandInterval::Between {
            lower: Band::P25,
            upper: Band::P50,
        }
    } else {
        BandInterval::Between {
            lower: Band::P50,
            upper: Band::P75,
        }
    };
    assert!(p25 < 52.3 && 52.3 < p75);
    assert_eq!(interval, expected);
    assert!(["25th-50th", "50th-75th"].contains(&interval.label().as_str()));
}

#[test]
fn nhs_classification_never_uses_who_bands() {
    let table = embedded_registry()
        .unwrap()
        .lookup(MeasurementType::Weight, Gender::Female, Standard::Nhs)
        .unwrap();
    let interval = classify(3.0, AgeInDays::new(0), table).unwrap();
    assert!(interval.bounds().iter().all(|b| Standard::Nhs.has_band(*b)));
}

#[test]
fn child_report_and_chart() {
    let registry = embedded_registry().unwrap();
    let mut child = Child::new("c1", "Sam", date("2024-01-01"), Gender::Male);
    let m = measurement_for(
        &child,
        "m1",
        date("2024-03-01"),
        MeasurementValues {
            height: Some(58.0),
            weight: Some(5.6),
            head_circumference: Some(39.0),
        },
    );
    assert_eq!(m.age_in_days, AgeInDays::new(60));
    child.add_measurement(m);

    // NHS has no head circumference table, so that entry falls back to WHO.
    let report = assess_child(registry, &child, Standard::Nhs).unwrap();
    assert_eq!(report.len(), 3);
    assert!(report.iter().all(|a| a.age_label == "2 months"));
    let hc = &report[2];
    assert_eq!(hc.measurement, MeasurementType::HeadCircumference);
    assert!(matches!(
        hc.outcome,
        AssessmentOutcome::Classified {
            standard: Standard::Who,
            fallback: true,
            ..
        }
    ));

    let chart = build_chart(who_height_boys(), &child.measurements).unwrap();
    assert_eq!(chart.axis, AgeAxis::Months);
    assert_eq!(chart.title(), "Height - WHO Percentiles");
    assert_eq!(chart.points.len(), 1);
}

#[test]
fn curve_spans_whole_table() {
    let table = who_height_boys();
    let rows = curve(table, 7).unwrap();
    assert_eq!(rows.first().unwrap(), table.first().unwrap());
    assert_eq!(rows.last().unwrap(), table.last().unwrap());
}

fn two_row_table(a1: u32, gap: u32, v1: f64, dv: f64) -> ReferenceTable {
    ReferenceTable::new(
        TableKey::new(MeasurementType::Weight, Gender::Male, Standard::Who),
        vec![
            ReferenceRow::new(AgeInDays::new(a1)).with(Band::P50, v1),
            ReferenceRow::new(AgeInDays::new(a1 + gap)).with(Band::P50, v1 + dv),
        ],
    )
}

proptest! {
    #[test]
    fn age_of_same_date_is_zero(days in 0i64..80_000) {
        let d = CalendarDate::from(
            chrono::NaiveDate::from_ymd_opt(1900, 1, 1).unwrap() + chrono::Days::new(days as u64),
        );
        prop_assert_eq!(age_in_days(d, d), AgeInDays::ZERO);
    }

    #[test]
    fn age_is_symmetric(a in 0u64..60_000, b in 0u64..60_000) {
        let base = chrono::NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
        let x = CalendarDate::from(base + chrono::Days::new(a));
        let y = CalendarDate::from(base + chrono::Days::new(b));
        prop_assert_eq!(age_in_days(x, y), age_in_days(y, x));
        prop_assert_eq!(u64::from(age_in_days(x, y).days()), a.abs_diff(b));
    }

    #[test]
    fn interpolation_clamps_at_both_ends(index in 0usize..10, age in 0u32..2_000) {
        let tables = embedded_tables();
        let table = tables[index % tables.len()];
        let first = table.first().unwrap();
        let last = table.last().unwrap();
        let row = interpolate(AgeInDays::new(age), table).unwrap();
        if age <= first.age.days() {
            prop_assert_eq!(&row, first);
        } else if age >= last.age.days() {
            prop_assert_eq!(&row, last);
        } else {
            prop_assert_eq!(row.age, AgeInDays::new(age));
        }
    }

    #[test]
    fn interpolation_is_continuous_at_rows(
        a1 in 0u32..500,
        gap in 2u32..100,
        v1 in 1.0f64..100.0,
        dv in 0.1f64..20.0,
    ) {
        let table = two_row_table(a1, gap, v1, dv);
        let rows = table.rows();
        prop_assert_eq!(&interpolate(AgeInDays::new(a1), &table).unwrap(), &rows[0]);
        prop_assert_eq!(&interpolate(AgeInDays::new(a1 + gap), &table).unwrap(), &rows[1]);

        let mid = interpolate(AgeInDays::new(a1 + gap / 2), &table)
            .unwrap()
            .get(Band::P50)
            .unwrap();
        prop_assert!(v1 < mid && mid < v1 + dv);
    }

    #[test]
    fn classification_covers_every_value(
        index in 0usize..10,
        age in 0u32..800,
        value in -1.0e6f64..1.0e6,
    ) {
        let tables = embedded_tables();
        let table = tables[index % tables.len()];
        let interval = classify(value, AgeInDays::new(age), table);
        prop_assert!(interval.is_ok());
        let interval = interval.unwrap();
        let standard = table.standard();
        prop_assert!(interval.bounds().iter().all(|b| standard.has_band(*b)));
    }

    #[test]
    fn value_on_a_line_falls_below_it(index in 0usize..10, age in 0u32..800, k in 0usize..9) {
        let tables = embedded_tables();
        let table = tables[index % tables.len()];
        let bands = table.bands();
        let band = bands[k % bands.len()];
        let line = interpolate(AgeInDays::new(age), table).unwrap().get(band).unwrap();

        let interval = classify(line, AgeInDays::new(age), table).unwrap();
        match interval {
            BandInterval::Below { band: lowest } => prop_assert_eq!(lowest, band),
            BandInterval::Between { upper, .. } => prop_assert_eq!(upper, band),
            BandInterval::Above { .. } => prop_assert!(false, "tie classified above {}", band),
        }
    }
}
