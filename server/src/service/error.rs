//! Error type returned by every handler.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use records::PersistenceError;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Body missing, not JSON, or not matching the payload schema.
    #[error("invalid request body: {message}")]
    InvalidBody { status: StatusCode, message: String },

    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("invalid due date '{0}' (expected YYYY-MM-DD)")]
    MalformedDate(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorPayload,
}

#[derive(Debug, Serialize)]
struct ErrorPayload {
    code: &'static str,
    message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Persistence(err) => match err {
                PersistenceError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
                PersistenceError::Validation { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, "validation_error")
                }
                PersistenceError::InvalidTransition { .. } => {
                    (StatusCode::CONFLICT, "invalid_transition")
                }
                PersistenceError::AlreadyDecided { .. } => (StatusCode::CONFLICT, "already_decided"),
                PersistenceError::Corrupt(_)
                | PersistenceError::Io(_)
                | PersistenceError::Database(_)
                | PersistenceError::Migration(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "storage_failure")
                }
            },
            ApiError::InvalidBody { status, .. } => (*status, "invalid_body"),
            ApiError::InvalidQuery(_) => (StatusCode::BAD_REQUEST, "invalid_query"),
            ApiError::InvalidPath(_) => (StatusCode::BAD_REQUEST, "invalid_path"),
            ApiError::MalformedDate(_) => (StatusCode::UNPROCESSABLE_ENTITY, "malformed_date"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "storage failure");
            "internal storage error".to_string()
        } else {
            tracing::debug!(%status, error = %self, "request rejected");
            self.to_string()
        };
        let body = ErrorBody {
            error: ErrorPayload { code, message },
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::InvalidQuery(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidPath(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use records::model::{PermitStatus, RecordKind};

    #[test]
    fn test_persistence_errors_map_to_status_codes() {
        let cases = [
            (
                PersistenceError::NotFound {
                    kind: RecordKind::Permit,
                    id: 4,
                },
                StatusCode::NOT_FOUND,
            ),
            (
                PersistenceError::Validation {
                    field: "name",
                    reason: "must not be blank",
                },
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                PersistenceError::AlreadyDecided {
                    id: 1,
                    status: PermitStatus::Approved,
                },
                StatusCode::CONFLICT,
            ),
            (
                PersistenceError::Corrupt("bad status".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status_and_code().0, expected);
        }
    }

    #[test]
    fn test_malformed_date_is_unprocessable() {
        let err = ApiError::MalformedDate("2024-13-01".to_string());
        assert_eq!(
            err.status_and_code(),
            (StatusCode::UNPROCESSABLE_ENTITY, "malformed_date")
        );
    }

    #[test]
    fn test_storage_failure_hides_details() {
        let response = ApiError::from(PersistenceError::Corrupt("tasks.status".to_string()))
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
