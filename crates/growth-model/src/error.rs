use thiserror::Error;

/// Errors raised while building model values from external input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// A date string could not be read as a calendar date.
    #[error("invalid date '{input}': {reason}")]
    InvalidDate { input: String, reason: &'static str },

    /// A code or label did not match any known variant.
    #[error("unknown {kind}: '{value}'")]
    UnknownValue { kind: &'static str, value: String },
}

impl ModelError {
    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        Self::UnknownValue {
            kind,
            value: value.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
