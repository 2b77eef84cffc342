//! Reference percentile tables.
//!
//! A [`ReferenceTable`] is identified by a [`TableKey`] and owns rows sorted by
//! strictly increasing age. Rows map bands to values; a band missing from a
//! row means the standard does not define that line at that age.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::date::AgeInDays;
use crate::enums::{Band, Gender, MeasurementType, Standard};

/// Identity of a reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TableKey {
    pub measurement: MeasurementType,
    pub gender: Gender,
    pub standard: Standard,
}

impl TableKey {
    pub fn new(measurement: MeasurementType, gender: Gender, standard: Standard) -> Self {
        Self {
            measurement,
            gender,
            standard,
        }
    }
}

impl fmt::Display for TableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.standard, self.measurement, self.gender)
    }
}

/// One row of a percentile table, or an interpolated row at any age.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRow {
    pub age: AgeInDays,
    pub values: BTreeMap<Band, f64>,
}

impl ReferenceRow {
    pub fn new(age: AgeInDays) -> Self {
        Self {
            age,
            values: BTreeMap::new(),
        }
    }

    /// Builder-style insert used by loaders and tests.
    #[must_use]
    pub fn with(mut self, band: Band, value: f64) -> Self {
        self.values.insert(band, value);
        self
    }

    pub fn insert(&mut self, band: Band, value: f64) {
        self.values.insert(band, value);
    }

    pub fn get(&self, band: Band) -> Option<f64> {
        self.values.get(&band).copied()
    }

    /// Bands populated in this row, ascending.
    pub fn bands(&self) -> impl Iterator<Item = Band> + '_ {
        self.values.keys().copied()
    }
}

/// An immutable, age-ordered percentile table for one [`TableKey`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceTable {
    key: TableKey,
    rows: Vec<ReferenceRow>,
}

impl ReferenceTable {
    /// Creates a table. Callers supply rows already sorted by age.
    pub fn new(key: TableKey, rows: Vec<ReferenceRow>) -> Self {
        Self { key, rows }
    }

    pub fn key(&self) -> TableKey {
        self.key
    }

    pub fn standard(&self) -> Standard {
        self.key.standard
    }

    pub fn rows(&self) -> &[ReferenceRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn first(&self) -> Option<&ReferenceRow> {
        self.rows.first()
    }

    pub fn last(&self) -> Option<&ReferenceRow> {
        self.rows.last()
    }

    /// The band schema of this table's standard, lowest first.
    pub fn bands(&self) -> &'static [Band] {
        self.key.standard.bands()
    }
}

/// The interval between adjacent centile lines that a value falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "position", rename_all = "camelCase")]
pub enum BandInterval {
    /// At or below the lowest populated line.
    Below { band: Band },
    /// Strictly above `lower` and at or below `upper`.
    Between { lower: Band, upper: Band },
    /// Strictly above the highest populated line.
    Above { band: Band },
}

impl BandInterval {
    /// Short chart label such as `<3rd`, `25th-50th` or `>97th`.
    pub fn label(&self) -> String {
        self.to_string()
    }

    /// Every band this interval is bounded by.
    pub fn bounds(&self) -> Vec<Band> {
        match *self {
            BandInterval::Below { band } | BandInterval::Above { band } => vec![band],
            BandInterval::Between { lower, upper } => vec![lower, upper],
        }
    }
}

impl fmt::Display for BandInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandInterval::Below { band } => write!(f, "<{band}"),
            BandInterval::Between { lower, upper } => write!(f, "{lower}-{upper}"),
            BandInterval::Above { band } => write!(f, ">{band}"),
        }
    }
}
