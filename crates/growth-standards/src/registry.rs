//! Reference table registry.
//!
//! Tables are loaded once and never mutated afterwards. The registry only
//! hands out shared references, so a single instance can serve any number
//! of concurrent readers.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use growth_model::{Gender, MeasurementType, ReferenceTable, Standard, TableKey};
use tracing::{debug, info};

use crate::embedded;
use crate::error::{Result, StandardsError};
use crate::loader;
use crate::paths::{reference_dir_from_env, table_file_name};

/// Where reference tables come from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReferenceSource {
    /// Tables compiled into the binary.
    #[default]
    Embedded,
    /// Tables read from `<dir>/<standard>/<measurement>_<gender>.csv`.
    Directory(PathBuf),
}

/// Configuration for loading the registry.
#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    pub source: ReferenceSource,
}

impl RegistryConfig {
    /// Uses `GROWTH_REFERENCE_DIR` when set, embedded data otherwise.
    pub fn from_env() -> Self {
        Self::with_directory(reference_dir_from_env())
    }

    /// Uses `dir` when given, embedded data otherwise.
    pub fn with_directory(dir: Option<PathBuf>) -> Self {
        let source = dir.map_or(ReferenceSource::Embedded, ReferenceSource::Directory);
        Self { source }
    }
}

/// Read-only store of reference tables keyed by (measurement, gender, standard).
#[derive(Debug, Clone, Default)]
pub struct ReferenceRegistry {
    tables: BTreeMap<TableKey, ReferenceTable>,
}

impl ReferenceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load tables with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the source directory is missing or any table file
    /// fails to parse.
    pub fn load(config: &RegistryConfig) -> Result<Self> {
        match &config.source {
            ReferenceSource::Embedded => Self::load_embedded(),
            ReferenceSource::Directory(dir) => Self::load_from_dir(dir),
        }
    }

    /// Load the compiled-in WHO and NHS tables.
    pub fn load_embedded() -> Result<Self> {
        let mut registry = Self::new();
        for (key, file, content) in embedded::embedded_tables() {
            registry.insert(loader::parse_table(key, file, content)?);
        }
        info!(tables = registry.len(), "loaded embedded reference tables");
        Ok(registry)
    }

    /// Load tables from a reference directory.
    ///
    /// Files that do not exist are simply not registered.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(StandardsError::DirectoryNotFound {
                path: dir.to_path_buf(),
            });
        }
        let mut registry = Self::new();
        for key in all_keys() {
            let path = dir.join(table_file_name(&key));
            if !path.is_file() {
                debug!(table = %key, path = %path.display(), "no reference file");
                continue;
            }
            registry.insert(loader::load_table(key, &path)?);
        }
        info!(
            tables = registry.len(),
            dir = %dir.display(),
            "loaded reference tables from directory"
        );
        Ok(registry)
    }

    /// Register a table, replacing any table with the same key.
    pub fn insert(&mut self, table: ReferenceTable) -> Option<ReferenceTable> {
        self.tables.insert(table.key(), table)
    }

    /// Look up the table for an exact (measurement, gender, standard) triple.
    ///
    /// # Errors
    ///
    /// Returns [`StandardsError::NotFound`] when nothing is registered for
    /// the triple. Callers decide whether to fall back to another standard.
    pub fn lookup(
        &self,
        measurement: MeasurementType,
        gender: Gender,
        standard: Standard,
    ) -> Result<&ReferenceTable> {
        self.get(&TableKey::new(measurement, gender, standard))
            .ok_or(StandardsError::NotFound {
                measurement,
                gender,
                standard,
            })
    }

    pub fn get(&self, key: &TableKey) -> Option<&ReferenceTable> {
        self.tables.get(key)
    }

    pub fn contains(&self, key: &TableKey) -> bool {
        self.tables.contains_key(key)
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = TableKey> + '_ {
        self.tables.keys().copied()
    }

    pub fn tables(&self) -> impl Iterator<Item = &ReferenceTable> + '_ {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Check if any table is registered for a standard.
    pub fn has_standard(&self, standard: Standard) -> bool {
        self.keys().any(|key| key.standard == standard)
    }

    /// Standards with at least one registered table.
    pub fn available_standards(&self) -> Vec<Standard> {
        Standard::ALL
            .into_iter()
            .filter(|standard| self.has_standard(*standard))
            .collect()
    }
}

/// Every combination a registry could hold.
pub fn all_keys() -> impl Iterator<Item = TableKey> {
    Standard::ALL.into_iter().flat_map(|standard| {
        MeasurementType::ALL.into_iter().flat_map(move |measurement| {
            Gender::ALL
                .into_iter()
                .map(move |gender| TableKey::new(measurement, gender, standard))
        })
    })
}

static EMBEDDED_REGISTRY: OnceLock<ReferenceRegistry> = OnceLock::new();

/// Returns the process-wide registry of embedded tables.
///
/// Parsed on first access and cached for the life of the process.
pub fn embedded_registry() -> Result<&'static ReferenceRegistry> {
    if let Some(registry) = EMBEDDED_REGISTRY.get() {
        return Ok(registry);
    }
    let registry = ReferenceRegistry::load_embedded()?;
    Ok(EMBEDDED_REGISTRY.get_or_init(|| registry))
}
