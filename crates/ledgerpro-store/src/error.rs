//! Error types for ledgerpro-store

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error")]
    Io(#[from] io::Error),

    #[error("Data format error: {message}")]
    Format { message: String },

    #[error("Account not found: {id}")]
    AccountNotFound { id: String },

    #[error("Transaction not found: {id}")]
    TransactionNotFound { id: String },
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        StoreError::Format {
            message: error.to_string(),
        }
    }
}

/// Result type with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
