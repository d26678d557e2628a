use thiserror::Error;

/// Errors raised while configuring or querying an inference engine.
///
/// All of them are configuration mistakes; inference itself is pure
/// computation over already validated state.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FuzzyError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("variable `{0}` is already registered")]
    DuplicateVariable(String),

    #[error("label `{0}` is defined twice")]
    DuplicateLabel(String),

    #[error("invalid domain [{min}, {max}]: min must be finite and below max")]
    InvalidDomain { min: f64, max: f64 },

    #[error("unknown variable `{0}`")]
    UnknownVariable(String),
}

pub type Result<T, E = FuzzyError> = std::result::Result<T, E>;
