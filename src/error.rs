// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Error kinds shared by the verifiers and the HTTP layer.
//!
//! Core operations return [`ServiceError`]. The HTTP layer converts it into
//! an [`ApiError`] by kind, so status codes never depend on message text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::ledger::LedgerError;

/// Failure kinds of the gateway's core operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// Missing or malformed caller input.
    #[error("{0}")]
    Validation(String),

    /// The referenced transaction or account does not exist.
    #[error("{0}")]
    NotFound(String),

    /// The transaction exists but failed on-chain.
    #[error("{0}")]
    Execution(String),

    /// Infrastructure, RPC or otherwise unexpected failure.
    #[error("{0}")]
    Internal(String),

    /// The operation was cancelled by shutdown or deadline.
    #[error("Operation cancelled")]
    Cancelled,
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Stable machine-readable code for this kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation_error",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::Execution(_) => "execution_failed",
            ServiceError::Internal(_) => "internal_error",
            ServiceError::Cancelled => "cancelled",
        }
    }

    /// HTTP status for this kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::Execution(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Cancelled => StatusCode::REQUEST_TIMEOUT,
        }
    }
}

impl From<LedgerError> for ServiceError {
    fn from(err: LedgerError) -> Self {
        ServiceError::Internal(err.to_string())
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error_code: &'static str,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    error_code: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error_code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            error_code,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ServiceError::validation(message).into()
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ServiceError::not_found(message).into()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self::new(err.status_code(), err.error_code(), err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(error_code = self.error_code, error = %self.message, "Request failed");
        }
        let body = Json(ErrorBody {
            error: self.message,
            error_code: self.error_code.to_string(),
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[test]
    fn every_kind_maps_to_a_distinct_status() {
        let cases = [
            (ServiceError::validation("x"), StatusCode::BAD_REQUEST),
            (ServiceError::not_found("x"), StatusCode::NOT_FOUND),
            (
                ServiceError::Execution("x".into()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (ServiceError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (ServiceError::Cancelled, StatusCode::REQUEST_TIMEOUT),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn ledger_errors_become_internal() {
        let err: ServiceError = LedgerError::Timeout.into();
        assert!(matches!(err, ServiceError::Internal(_)));
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::bad_request("bad data").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"bad data","error_code":"validation_error"}"#);
    }
}
