//! Embedded reference data.
//!
//! All tables are compiled in with `include_str!()`, so the default registry
//! needs no file I/O.
//!
//! # Structure
//!
//! - WHO Child Growth Standards, 0-24 months: length/height, weight and head
//!   circumference for boys and girls
//! - UK-WHO (NHS), 0-24 months: length/height and weight for boys and girls
//!
//! Rows are monthly: month × 30.4375 days, rounded to a whole day.

use growth_model::{Gender, MeasurementType, Standard, TableKey};

// =============================================================================
// WHO
// =============================================================================

pub const WHO_HEIGHT_BOYS: &str = include_str!("../data/who/height_boys.csv");
pub const WHO_HEIGHT_GIRLS: &str = include_str!("../data/who/height_girls.csv");
pub const WHO_WEIGHT_BOYS: &str = include_str!("../data/who/weight_boys.csv");
pub const WHO_WEIGHT_GIRLS: &str = include_str!("../data/who/weight_girls.csv");
pub const WHO_HEAD_CIRCUMFERENCE_BOYS: &str =
    include_str!("../data/who/head_circumference_boys.csv");
pub const WHO_HEAD_CIRCUMFERENCE_GIRLS: &str =
    include_str!("../data/who/head_circumference_girls.csv");

// =============================================================================
// NHS (UK-WHO)
// =============================================================================

pub const NHS_HEIGHT_BOYS: &str = include_str!("../data/nhs/height_boys.csv");
pub const NHS_HEIGHT_GIRLS: &str = include_str!("../data/nhs/height_girls.csv");
pub const NHS_WEIGHT_BOYS: &str = include_str!("../data/nhs/weight_boys.csv");
pub const NHS_WEIGHT_GIRLS: &str = include_str!("../data/nhs/weight_girls.csv");

/// Every embedded table as (key, file name, CSV content).
pub fn embedded_tables() -> Vec<(TableKey, &'static str, &'static str)> {
    use Gender::{Female, Male};
    use MeasurementType::{HeadCircumference, Height, Weight};
    use Standard::{Nhs, Who};

    vec![
        (TableKey::new(Height, Male, Who), "who/height_boys.csv", WHO_HEIGHT_BOYS),
        (TableKey::new(Height, Female, Who), "who/height_girls.csv", WHO_HEIGHT_GIRLS),
        (TableKey::new(Weight, Male, Who), "who/weight_boys.csv", WHO_WEIGHT_BOYS),
        (TableKey::new(Weight, Female, Who), "who/weight_girls.csv", WHO_WEIGHT_GIRLS),
        (
            TableKey::new(HeadCircumference, Male, Who),
            "who/head_circumference_boys.csv",
            WHO_HEAD_CIRCUMFERENCE_BOYS,
        ),
        (
            TableKey::new(HeadCircumference, Female, Who),
            "who/head_circumference_girls.csv",
            WHO_HEAD_CIRCUMFERENCE_GIRLS,
        ),
        (TableKey::new(Height, Male, Nhs), "nhs/height_boys.csv", NHS_HEIGHT_BOYS),
        (TableKey::new(Height, Female, Nhs), "nhs/height_girls.csv", NHS_HEIGHT_GIRLS),
        (TableKey::new(Weight, Male, Nhs), "nhs/weight_boys.csv", NHS_WEIGHT_BOYS),
        (TableKey::new(Weight, Female, Nhs), "nhs/weight_girls.csv", NHS_WEIGHT_GIRLS),
    ]
}
