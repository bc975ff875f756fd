use crate::geom::SamplingError;

use super::config::ConfigError;

/// Result type for level generation.
pub type LevelResult<T> = Result<T, LevelError>;

/// Failures that abort a generation run. None of them leave a partial level
/// behind.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LevelError {
    /// A vector that had to be normalized (or divided by) had zero length.
    #[error("degenerate vector in {operation}")]
    DegenerateVector { operation: &'static str },
    /// Parameters were rejected before generation started.
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
    /// A rejection sampler hit its attempt cap.
    #[error("{sampler} found no acceptable sample after {attempts} attempts")]
    UnboundedSampling {
        sampler: &'static str,
        attempts: usize,
    },
}

impl LevelError {
    #[must_use]
    pub const fn degenerate(operation: &'static str) -> Self {
        Self::DegenerateVector { operation }
    }
}

impl From<SamplingError> for LevelError {
    fn from(err: SamplingError) -> Self {
        match err {
            SamplingError::Exhausted { sampler, attempts } => {
                Self::UnboundedSampling { sampler, attempts }
            }
            SamplingError::DegenerateAxis => Self::degenerate("cone sampling axis"),
        }
    }
}
