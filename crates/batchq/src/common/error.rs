use thiserror::Error;

use crate::common::error::BatchqError::GenericError;

#[derive(Debug, Error)]
pub enum BatchqError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Error: {0}")]
    GenericError(String),
}

pub fn error<T>(message: String) -> crate::Result<T> {
    Err(GenericError(message))
}
