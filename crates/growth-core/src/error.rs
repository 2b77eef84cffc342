use growth_model::TableKey;
use growth_standards::StandardsError;
use thiserror::Error;

/// Errors raised by percentile queries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GrowthError {
    /// A registered table has zero rows.
    #[error("reference table {key} has no rows")]
    EmptyTable { key: TableKey },

    #[error(transparent)]
    Standards(#[from] StandardsError),
}

pub type Result<T> = std::result::Result<T, GrowthError>;
