use folio_domain::{ParseFieldError, ParsePeriodError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Record book not found: {0}")]
    BookNotFound(String),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ParsePeriodError> for CoreError {
    fn from(err: ParsePeriodError) -> Self {
        CoreError::Validation(err.to_string())
    }
}

impl From<ParseFieldError> for CoreError {
    fn from(err: ParseFieldError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
