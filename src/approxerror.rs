use thiserror::Error;

/// Structural failures of an approximation request.
///
/// Numerical degeneracy (NaN, ±Infinity) is never reported here: those
/// values are returned as results and left to the caller to display.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApproxError {
    #[error("sample count must be positive")]
    EmptyPartition,

    #[error("interval bound {0} is not finite")]
    NonFiniteBound(f64),

    #[error("chunk size must be positive")]
    EmptyChunk,

    #[error("step size must be positive and finite, got {0}")]
    InvalidStepSize(f64),

    #[error("step size {delta} needs {steps} steps, more than the {max} allowed")]
    TooManySteps { delta: f64, steps: u64, max: u64 },

    #[error("series degree must be at least {min}, got {degree}")]
    DegreeTooSmall { degree: u64, min: u64 },

    #[error("series degree must be at most {max}, got {degree}")]
    DegreeTooLarge { degree: u64, max: u64 },

    #[error("computation was superseded before it finished")]
    Cancelled,
}

pub type ApproxResult<T> = Result<T, ApproxError>;
