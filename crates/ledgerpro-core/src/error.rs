//! Error types for ledgerpro-core
//!
//! This module provides error handling for the ledger engine, including
//! error codes, detailed messages, and suggestions. Validation and
//! closed-account failures are detected before any store call; store
//! failures are wrapped after the fact.

use ledgerpro_store::StoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Required field missing or malformed input
    ValidationError,
    /// Mutation attempted against a closed account
    AccountClosed,
    /// Account not found
    AccountNotFound,
    /// Transaction not found
    TransactionNotFound,
    /// Record store call failed
    StoreError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::AccountClosed => write!(f, "ACCOUNT_CLOSED"),
            ErrorCode::AccountNotFound => write!(f, "ACCOUNT_NOT_FOUND"),
            ErrorCode::TransactionNotFound => write!(f, "TRANSACTION_NOT_FOUND"),
            ErrorCode::StoreError => write!(f, "STORE_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - the user can correct and retry
    Warning,
    /// Error - operation failed
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Main error type for ledgerpro-core
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Account is closed: {id}")]
    AccountClosed { id: String },

    #[error("Account not found: {id}")]
    AccountNotFound { id: String },

    #[error("Transaction not found: {id}")]
    TransactionNotFound { id: String },

    #[error("Store error: {message}")]
    Store { message: String },
}

impl LedgerError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            LedgerError::Validation { .. } => ErrorCode::ValidationError,
            LedgerError::AccountClosed { .. } => ErrorCode::AccountClosed,
            LedgerError::AccountNotFound { .. } => ErrorCode::AccountNotFound,
            LedgerError::TransactionNotFound { .. } => ErrorCode::TransactionNotFound,
            LedgerError::Store { .. } => ErrorCode::StoreError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            LedgerError::Validation { .. } => ErrorSeverity::Warning,
            LedgerError::AccountClosed { .. } => ErrorSeverity::Warning,
            LedgerError::AccountNotFound { .. } => ErrorSeverity::Info,
            LedgerError::TransactionNotFound { .. } => ErrorSeverity::Info,
            LedgerError::Store { .. } => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            LedgerError::Validation { message } => {
                details = details.with_detail(serde_json::json!({ "validation_message": message }));
                details = details.with_suggestion(
                    "Fill in the highlighted field and submit again.".to_string(),
                );
            }
            LedgerError::AccountClosed { id } => {
                details = details.with_suggestion(format!(
                    "Reopen account '{}' before changing its transactions.",
                    id
                ));
                details = details
                    .with_suggestion("Use the account's closed toggle to reopen it.".to_string());
            }
            LedgerError::AccountNotFound { id } => {
                details = details.with_suggestion(format!(
                    "Check if the account '{}' still exists.",
                    id
                ));
                details = details.with_suggestion(
                    "Use the /api/accounts endpoint to list all accounts.".to_string(),
                );
            }
            LedgerError::TransactionNotFound { .. } => {
                details = details
                    .with_suggestion("Check if the transaction ID is correct.".to_string());
                details = details.with_suggestion(
                    "Reload the transaction list; the entry may have been deleted.".to_string(),
                );
            }
            LedgerError::Store { .. } => {
                details = details.with_suggestion(
                    "No changes were applied; the operation can be retried.".to_string(),
                );
            }
        }

        details
    }
}

impl From<StoreError> for LedgerError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::AccountNotFound { id } => LedgerError::AccountNotFound { id },
            StoreError::TransactionNotFound { id } => LedgerError::TransactionNotFound { id },
            other => LedgerError::Store {
                message: other.to_string(),
            },
        }
    }
}

/// Result type with LedgerError
pub type LedgerResult<T> = Result<T, LedgerError>;

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::ValidationError.to_string(), "VALIDATION_ERROR");
        assert_eq!(ErrorCode::AccountClosed.to_string(), "ACCOUNT_CLOSED");
        assert_eq!(ErrorCode::StoreError.to_string(), "STORE_ERROR");
    }

    #[test]
    fn test_error_severity_display() {
        assert_eq!(ErrorSeverity::Info.to_string(), "info");
        assert_eq!(ErrorSeverity::Warning.to_string(), "warning");
        assert_eq!(ErrorSeverity::Error.to_string(), "error");
    }

    #[test]
    fn test_ledger_error_code() {
        let error = LedgerError::AccountClosed {
            id: "acc-1".to_string(),
        };
        assert_eq!(error.code(), ErrorCode::AccountClosed);

        let error = LedgerError::Validation {
            message: "Date of entry is required.".to_string(),
        };
        assert_eq!(error.code(), ErrorCode::ValidationError);
    }

    #[test]
    fn test_ledger_error_severity() {
        let error = LedgerError::Store {
            message: "disk full".to_string(),
        };
        assert_eq!(error.severity(), ErrorSeverity::Error);

        let error = LedgerError::AccountNotFound {
            id: "acc-1".to_string(),
        };
        assert_eq!(error.severity(), ErrorSeverity::Info);
    }

    #[test]
    fn test_error_details_account_closed() {
        let error = LedgerError::AccountClosed {
            id: "acc-9".to_string(),
        };
        let details = error.to_details();

        assert_eq!(details.code, ErrorCode::AccountClosed);
        assert!(!details.suggestions.is_empty());
        assert!(details.message.contains("acc-9"));
    }

    #[test]
    fn test_error_details_validation_carries_message() {
        let error = LedgerError::Validation {
            message: "Date of entry is required.".to_string(),
        };
        let details = error.to_details();

        assert_eq!(details.code, ErrorCode::ValidationError);
        assert!(details.details.is_some());
    }

    #[test]
    fn test_store_error_conversion() {
        let error: LedgerError = StoreError::TransactionNotFound {
            id: "txn-1".to_string(),
        }
        .into();
        assert_eq!(error.code(), ErrorCode::TransactionNotFound);

        let error: LedgerError = StoreError::Format {
            message: "bad json".to_string(),
        }
        .into();
        assert_eq!(error.code(), ErrorCode::StoreError);
    }

    #[test]
    fn test_error_code_serializes_screaming_snake() {
        let json = serde_json::to_string(&ErrorCode::AccountClosed).unwrap();
        assert_eq!(json, "\"ACCOUNT_CLOSED\"");
    }
}
