/// Errors returned by the clinical domain crate.
///
/// Derivation and classification fail fast on invalid input; there are no
/// silent defaults. Missing foreign keys are not errors anywhere in this
/// crate; joins substitute a placeholder instead (see [`crate::query`]).
#[derive(Debug, thiserror::Error)]
pub enum ClinicalError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{field} out of range: {value} (expected {min} to {max})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

pub type ClinicalResult<T> = std::result::Result<T, ClinicalError>;
