use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an amount string could not be turned into a capital amount.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionError {
    #[error("malformed amount: more than one decimal point")]
    MalformedInput,
    #[error("amount out of range: the integer part must be below one trillion")]
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorReason {
    Malformed,
    OutOfRange,
}

impl ConversionError {
    pub fn reason(&self) -> ErrorReason {
        match self {
            ConversionError::MalformedInput => ErrorReason::Malformed,
            ConversionError::OutOfRange => ErrorReason::OutOfRange,
        }
    }
}

#[derive(Error, Debug)]
pub enum DaxieError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DaxieError>;
