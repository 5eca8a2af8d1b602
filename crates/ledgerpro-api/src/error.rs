//! HTTP error responses.
//!
//! Every handler that can fail returns [`ApiError`], which renders the
//! structured error payload from the core crate with a matching status code.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use ledgerpro_core::error::{ErrorCode, LedgerError};
use thiserror::Error;

/// Result alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Wrapper that turns a [`LedgerError`] into an HTTP response.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub LedgerError);

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0.code() {
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::AccountClosed => StatusCode::CONFLICT,
            ErrorCode::AccountNotFound | ErrorCode::TransactionNotFound => StatusCode::NOT_FOUND,
            ErrorCode::StoreError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            log::error!("request failed: {}", self.0);
        }
        let body = serde_json::to_string(&self.0.to_details()).unwrap_or_default();
        (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}
