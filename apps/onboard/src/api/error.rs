//! # API Errors
//!
//! Maps engine errors onto HTTP status codes with a `{"message": ...}` body.
//!
//! | Error | Status |
//! |-------|--------|
//! | `EmployeeNotFound` | 404 |
//! | `NotCompleted`, `DuplicateEmail`, `InvalidInput`, `InvalidStep`, malformed body | 400 |
//! | `InvalidCredentials`, missing or bad token | 401 |
//! | non-admin on admin routes | 403 |
//! | `VersionConflict` | 409 |
//! | anything else | 500 |

use super::types::MessageResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use onboard_core::OnboardError;
use thiserror::Error;

/// Errors returned by handlers and middleware.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] OnboardError),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Admin access required")]
    Forbidden,

    #[error("Invalid request body: {0}")]
    BadRequest(String),
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized | ApiError::TokenExpired => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Core(err) => match err {
                OnboardError::EmployeeNotFound(_) => StatusCode::NOT_FOUND,
                OnboardError::NotCompleted
                | OnboardError::DuplicateEmail(_)
                | OnboardError::InvalidInput(_)
                | OnboardError::InvalidStep { .. } => StatusCode::BAD_REQUEST,
                OnboardError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                OnboardError::VersionConflict { .. } => StatusCode::CONFLICT,
                OnboardError::InvariantViolation(_)
                | OnboardError::SerializationError(_)
                | OnboardError::DeserializationError(_)
                | OnboardError::IoError(_)
                | OnboardError::CredentialError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request failed");
            "Server error".to_string()
        } else {
            self.to_string()
        };
        (status, Json(MessageResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let cases = [
            (
                ApiError::from(OnboardError::EmployeeNotFound("x".into())),
                StatusCode::NOT_FOUND,
            ),
            (ApiError::from(OnboardError::NotCompleted), StatusCode::BAD_REQUEST),
            (
                ApiError::from(OnboardError::InvalidStep { step: 9, total: 6 }),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::from(OnboardError::InvalidCredentials),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::from(OnboardError::VersionConflict {
                    expected: 1,
                    found: 2,
                }),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::from(OnboardError::IoError("disk".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (ApiError::Unauthorized, StatusCode::UNAUTHORIZED),
            (ApiError::Forbidden, StatusCode::FORBIDDEN),
            (ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status(), expected, "{err}");
        }
    }

    #[test]
    fn server_errors_hide_details() {
        let response = ApiError::from(OnboardError::IoError("secret path".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
