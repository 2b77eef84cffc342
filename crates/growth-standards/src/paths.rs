//! Reference directory resolution.

use std::path::PathBuf;

/// Environment variable pointing at an external reference data directory.
pub const REFERENCE_DIR_ENV_VAR: &str = "GROWTH_REFERENCE_DIR";

/// Returns the directory named by `GROWTH_REFERENCE_DIR`, if set and non-empty.
pub fn reference_dir_from_env() -> Option<PathBuf> {
    std::env::var_os(REFERENCE_DIR_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Relative path of one table file inside a reference directory.
///
/// Layout: `<standard>/<measurement>_<gender>.csv`, for example
/// `who/head_circumference_girls.csv`.
pub fn table_file_name(key: &growth_model::TableKey) -> PathBuf {
    PathBuf::from(key.standard.dir_name()).join(format!(
        "{}_{}.csv",
        key.measurement.file_stem(),
        key.gender.file_suffix()
    ))
}
