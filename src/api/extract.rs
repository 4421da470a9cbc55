// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JSON body extractor with the service's error contract.
//!
//! Use `ValidatedJson` instead of `axum::Json` for request bodies so that a
//! malformed body answers 400 `validation_error` with the usual JSON error
//! body instead of axum's plain-text rejection:
//!
//! ```rust,ignore
//! async fn my_handler(ValidatedJson(request): ValidatedJson<MyRequest>) -> impl IntoResponse {
//!     // request is MyRequest
//! }
//! ```

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use crate::error::ApiError;

/// Request body decoded from JSON; every rejection is a validation error.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(
                    status = %rejection.status(),
                    error = %rejection,
                    "Rejected request body"
                );
                Err(ApiError::bad_request(rejection.body_text()))
            }
        }
    }
}
