use thiserror::Error;

#[derive(Error, Debug)]
pub enum GreenlabError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),

    #[error(transparent)]
    Calc(#[from] CalcError),
}

/// Why a calculator produced no result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("{field} is not a number")]
    NotFinite { field: &'static str },

    #[error("{field} cannot be negative")]
    Negative { field: &'static str },

    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("green area cannot exceed the total area")]
    ExceedsTotal,

    #[error("result is out of range")]
    OutOfRange,
}

pub type Result<T> = std::result::Result<T, GreenlabError>;
