//! Type-safe enumerations for growth chart concepts.
//!
//! Each [`Standard`] carries its own ordered band schema. WHO charts use
//! seven centile lines, UK-WHO (NHS) charts use nine lines spaced two thirds
//! of a standard deviation apart, and the two sets only partly overlap.
//! Code that walks bands must always ask the table's standard for its schema.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// The kind of body measurement a value or table describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeasurementType {
    /// Length/height in centimetres.
    Height,
    /// Weight in kilograms.
    Weight,
    /// Occipitofrontal head circumference in centimetres.
    HeadCircumference,
}

impl MeasurementType {
    pub const ALL: [MeasurementType; 3] = [
        MeasurementType::Height,
        MeasurementType::Weight,
        MeasurementType::HeadCircumference,
    ];

    /// Returns the identifier used in stored records.
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementType::Height => "height",
            MeasurementType::Weight => "weight",
            MeasurementType::HeadCircumference => "headCircumference",
        }
    }

    /// Returns the file stem used for reference data files.
    pub fn file_stem(&self) -> &'static str {
        match self {
            MeasurementType::Height => "height",
            MeasurementType::Weight => "weight",
            MeasurementType::HeadCircumference => "head_circumference",
        }
    }

    /// Returns the display title.
    pub fn title(&self) -> &'static str {
        match self {
            MeasurementType::Height => "Height",
            MeasurementType::Weight => "Weight",
            MeasurementType::HeadCircumference => "Head Circumference",
        }
    }

    /// Returns the unit values are recorded in.
    pub fn unit(&self) -> &'static str {
        match self {
            MeasurementType::Height | MeasurementType::HeadCircumference => "cm",
            MeasurementType::Weight => "kg",
        }
    }
}

impl fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MeasurementType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "height" | "length" => Ok(MeasurementType::Height),
            "weight" => Ok(MeasurementType::Weight),
            "headcircumference" | "head" | "hc" => Ok(MeasurementType::HeadCircumference),
            _ => Err(ModelError::unknown("measurement type", s)),
        }
    }
}

/// Sex of the child, selecting the boys' or girls' reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    /// Returns the suffix used by reference data file names.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Gender::Male => "boys",
            Gender::Female => "girls",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" | "boy" | "boys" => Ok(Gender::Male),
            "female" | "f" | "girl" | "girls" => Ok(Gender::Female),
            _ => Err(ModelError::unknown("gender", s)),
        }
    }
}

/// A single labelled centile line.
///
/// Variants are declared in ascending percentile order so the derived
/// `Ord` sorts bands from the lowest curve to the highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Band {
    #[serde(rename = "0.4th")]
    P0_4,
    #[serde(rename = "2nd")]
    P2,
    #[serde(rename = "3rd")]
    P3,
    #[serde(rename = "9th")]
    P9,
    #[serde(rename = "10th")]
    P10,
    #[serde(rename = "25th")]
    P25,
    #[serde(rename = "50th")]
    P50,
    #[serde(rename = "75th")]
    P75,
    #[serde(rename = "90th")]
    P90,
    #[serde(rename = "91st")]
    P91,
    #[serde(rename = "97th")]
    P97,
    #[serde(rename = "98th")]
    P98,
    #[serde(rename = "99.6th")]
    P99_6,
}

impl Band {
    /// Returns the label printed on charts and used as the CSV column name.
    pub fn label(&self) -> &'static str {
        match self {
            Band::P0_4 => "0.4th",
            Band::P2 => "2nd",
            Band::P3 => "3rd",
            Band::P9 => "9th",
            Band::P10 => "10th",
            Band::P25 => "25th",
            Band::P50 => "50th",
            Band::P75 => "75th",
            Band::P90 => "90th",
            Band::P91 => "91st",
            Band::P97 => "97th",
            Band::P98 => "98th",
            Band::P99_6 => "99.6th",
        }
    }

    /// Returns the percentile this line represents.
    pub fn percentile(&self) -> f64 {
        match self {
            Band::P0_4 => 0.4,
            Band::P2 => 2.0,
            Band::P3 => 3.0,
            Band::P9 => 9.0,
            Band::P10 => 10.0,
            Band::P25 => 25.0,
            Band::P50 => 50.0,
            Band::P75 => 75.0,
            Band::P90 => 90.0,
            Band::P91 => 91.0,
            Band::P97 => 97.0,
            Band::P98 => 98.0,
            Band::P99_6 => 99.6,
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Band {
    type Err = ModelError;

    /// Accepts chart labels ("3rd", "99.6th") and short codes ("p3", "P99.6").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().to_lowercase();
        let number = trimmed
            .strip_prefix('p')
            .unwrap_or(&trimmed)
            .trim_end_matches(|c: char| c.is_ascii_alphabetic());
        match number {
            "0.4" => Ok(Band::P0_4),
            "2" => Ok(Band::P2),
            "3" => Ok(Band::P3),
            "9" => Ok(Band::P9),
            "10" => Ok(Band::P10),
            "25" => Ok(Band::P25),
            "50" => Ok(Band::P50),
            "75" => Ok(Band::P75),
            "90" => Ok(Band::P90),
            "91" => Ok(Band::P91),
            "97" => Ok(Band::P97),
            "98" => Ok(Band::P98),
            "99.6" => Ok(Band::P99_6),
            _ => Err(ModelError::unknown("band", s)),
        }
    }
}

const WHO_BANDS: [Band; 7] = [
    Band::P3,
    Band::P10,
    Band::P25,
    Band::P50,
    Band::P75,
    Band::P90,
    Band::P97,
];

const NHS_BANDS: [Band; 9] = [
    Band::P0_4,
    Band::P2,
    Band::P9,
    Band::P25,
    Band::P50,
    Band::P75,
    Band::P91,
    Band::P98,
    Band::P99_6,
];

/// A published source of reference percentile tables.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Standard {
    /// WHO Child Growth Standards.
    #[default]
    #[serde(rename = "WHO")]
    Who,
    /// UK-WHO growth charts as used by the NHS.
    #[serde(rename = "NHS")]
    Nhs,
}

impl Standard {
    pub const ALL: [Standard; 2] = [Standard::Who, Standard::Nhs];

    /// Returns the ordered band schema, lowest centile first.
    pub fn bands(&self) -> &'static [Band] {
        match self {
            Standard::Who => &WHO_BANDS,
            Standard::Nhs => &NHS_BANDS,
        }
    }

    /// Topmost line of the schema.
    pub fn highest_band(&self) -> Band {
        match self {
            Standard::Who => WHO_BANDS[WHO_BANDS.len() - 1],
            Standard::Nhs => NHS_BANDS[NHS_BANDS.len() - 1],
        }
    }

    /// Returns true if `band` belongs to this standard's schema.
    pub fn has_band(&self, band: Band) -> bool {
        self.bands().contains(&band)
    }

    /// Returns the short code.
    pub fn code(&self) -> &'static str {
        match self {
            Standard::Who => "WHO",
            Standard::Nhs => "NHS",
        }
    }

    /// Returns the name shown to users when picking a standard.
    pub fn label(&self) -> &'static str {
        match self {
            Standard::Who => "International (WHO)",
            Standard::Nhs => "UK (NHS)",
        }
    }

    /// Returns the directory name holding this standard's data files.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Standard::Who => "who",
            Standard::Nhs => "nhs",
        }
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Standard {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "WHO" => Ok(Standard::Who),
            "NHS" | "UK" | "UK-WHO" => Ok(Standard::Nhs),
            _ => Err(ModelError::unknown("standard", s)),
        }
    }
}
