//! Reference percentile tables for growth charts.
//!
//! This crate provides:
//!
//! - **Embedded tables** for WHO and NHS (UK-WHO) standards
//! - **A CSV loader** for reference tables, shared by embedded and on-disk data
//! - **A registry** answering `lookup(measurement, gender, standard)`
//!
//! # Reference Directory Structure
//!
//! ```text
//! reference/
//! ├── who/
//! │   ├── height_boys.csv
//! │   ├── weight_girls.csv
//! │   └── head_circumference_boys.csv
//! └── nhs/
//!     ├── height_boys.csv
//!     └── weight_girls.csv
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use growth_model::{Gender, MeasurementType, Standard};
//! use growth_standards::embedded_registry;
//!
//! let registry = embedded_registry()?;
//! let table = registry.lookup(MeasurementType::Height, Gender::Male, Standard::Who)?;
//! println!("{} rows", table.len());
//! ```

pub mod embedded;
pub mod error;
pub mod loader;
pub mod paths;
pub mod provider;
pub mod registry;

pub use error::{Result, StandardsError};
pub use loader::{AGE_COLUMN, load_table, parse_table};
pub use paths::{REFERENCE_DIR_ENV_VAR, reference_dir_from_env, table_file_name};
pub use provider::ReferenceProvider;
pub use registry::{
    ReferenceRegistry, ReferenceSource, RegistryConfig, all_keys, embedded_registry,
};
