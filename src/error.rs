use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Application error with explicit variants for each failure class.
///
/// Every handler returns `Result<_, AppError>`; there is no catch-all
/// exception path. The four variants map one-to-one onto response classes:
///
/// - [`AppError::Validation`] — client sent something unresolvable (400)
/// - [`AppError::NotFound`] — the addressed resource does not exist (404)
/// - [`AppError::CommitFailed`] — the store accepted the request but the
///   commit reported no effect (400, generic message)
/// - [`AppError::Internal`] — unexpected failure; the message is a fixed,
///   endpoint-specific string and never carries storage details (500)
#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    CommitFailed { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn commit_failed(message: impl Into<String>, details: Value) -> Self {
        Self::CommitFailed {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// Replaces the message of an [`AppError::Internal`] with a fixed,
    /// endpoint-specific one. Other variants pass through untouched.
    ///
    /// Handlers use this so a storage failure surfaces as the endpoint's
    /// fixed 500 message instead of leaking backend detail.
    pub fn masked_internal(self, message: impl Into<String>) -> Self {
        match self {
            Self::Internal { .. } => Self::internal(message, json!({})),
            other => other,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::CommitFailed { message, details } => {
                (StatusCode::BAD_REQUEST, "commit_failed", message, details)
            }
            AppError::Internal { message, details } => {
                tracing::error!(%message, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    message,
                    details,
                )
            }
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::bad_request(
                "Unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        AppError::internal("Database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "Validation failed",
            serde_json::to_value(&errors).unwrap_or(Value::Null),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::bad_request("bad", json!({})), 400),
            (AppError::not_found("missing", json!({})), 404),
            (AppError::commit_failed("no effect", json!({})), 400),
            (AppError::internal("boom", json!({})), 500),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status().as_u16(), expected);
        }
    }

    #[test]
    fn test_masked_internal_replaces_internal_message() {
        let masked = AppError::internal("Database error", json!({ "table": "talks" }))
            .masked_internal("Failed to get talks");

        match masked {
            AppError::Internal { message, details } => {
                assert_eq!(message, "Failed to get talks");
                assert_eq!(details, json!({}));
            }
            other => panic!("expected Internal, got {other:?}"),
        }
    }

    #[test]
    fn test_masked_internal_passes_other_variants_through() {
        let err = AppError::not_found("Could not find the talk", json!({ "id": 7 }))
            .masked_internal("Failed to get talks");

        match err {
            AppError::NotFound { message, .. } => {
                assert_eq!(message, "Could not find the talk");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
