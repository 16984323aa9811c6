// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::models::{ErrorResponse, ValidationError};
use crate::usecase::ServiceError;

const INTERNAL_DETAIL: &str = "Internal server error";

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    pub fn conflict(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, detail)
    }

    pub fn unprocessable(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, detail)
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_DETAIL)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound { .. } => Self::not_found(err.to_string()),
            ServiceError::Conflict { .. } => Self::conflict(err.to_string()),
            ServiceError::Persistence(e) => {
                tracing::error!(error = %e, "User store failure");
                Self::internal()
            }
            ServiceError::Token(e) => {
                tracing::error!(error = %e, code = e.error_code(), "Token signing failure");
                Self::internal()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::unprocessable(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            detail: self.detail,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenError;
    use crate::storage::StoreError;
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_detail() {
        let nf = ApiError::not_found("missing");
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.detail, "missing");

        let conflict = ApiError::conflict("taken");
        assert_eq!(conflict.status, StatusCode::CONFLICT);
        assert_eq!(conflict.detail, "taken");

        let unp = ApiError::unprocessable("oops");
        assert_eq!(unp.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(unp.detail, "oops");
    }

    #[test]
    fn service_errors_map_to_status_codes() {
        let nf: ApiError = ServiceError::NotFound {
            tax_id: "99999999999".into(),
        }
        .into();
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.detail, "User with tax_id 99999999999 not found");

        let conflict: ApiError = ServiceError::Conflict {
            tax_id: "12345678900".into(),
        }
        .into();
        assert_eq!(conflict.status, StatusCode::CONFLICT);
        assert!(conflict.detail.contains("already exists"));
    }

    #[test]
    fn internal_failures_hide_details() {
        let store: ApiError =
            ServiceError::Persistence(StoreError::Io(std::io::Error::other("disk on fire"))).into();
        assert_eq!(store.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(store.detail, INTERNAL_DETAIL);

        let token: ApiError =
            ServiceError::Token(TokenError::Signing("bad key".into())).into();
        assert_eq!(token.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!token.detail.contains("bad key"));
    }

    #[test]
    fn validation_error_is_unprocessable() {
        let err: ApiError = ValidationError::new("tax_id", "must not be empty").into();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.detail, "tax_id: must not be empty");
    }

    #[tokio::test]
    async fn into_response_returns_detail_body() {
        let response = ApiError::not_found("User not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"detail":"User not found"}"#);
    }
}
