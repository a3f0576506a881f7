use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde_json::json;
use std::fmt;

/// Application error types mapped onto HTTP responses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Missing or invalid user input (400 Bad Request)
    Validation(String),
    /// Referenced entity absent (404 Not Found)
    NotFound(String),
    /// Removal blocked by dependent rows (409 Conflict)
    Conflict(String),
    /// Any other storage or query failure (500 Internal Server Error)
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Validation(message)
            | ApiError::NotFound(message)
            | ApiError::Conflict(message)
            | ApiError::Internal(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Every error leaves the process as `{"error": <message>}` with the
/// matching status code; nothing beyond the message is exposed.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));

        (status, body).into_response()
    }
}

/// True when a statement failed on a foreign-key constraint. Both
/// backends report this in the error text ("violates foreign key
/// constraint" on Postgres, "FOREIGN KEY constraint failed" on SQLite).
pub fn is_foreign_key_violation(err: &DbErr) -> bool {
    err.to_string().to_lowercase().contains("foreign key")
}

/// Extension trait converting storage failures into client-safe errors.
/// The underlying cause is logged here and never sent to the client.
pub trait DbErrorExt {
    fn to_api_error(self, message: &str) -> ApiError;
}

impl DbErrorExt for DbErr {
    fn to_api_error(self, message: &str) -> ApiError {
        tracing::error!("{message}: {self}");
        ApiError::Internal(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (
                ApiError::Validation("Required fields missing".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::NotFound("Donor not found".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::Conflict("Failed to delete donor. May have related records.".to_string()),
                StatusCode::CONFLICT,
            ),
            (
                ApiError::Internal("Failed to fetch donors".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = err.into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_foreign_key_detection() {
        let pg_err = DbErr::Custom(
            "update or delete on table \"donors\" violates foreign key constraint \
             \"fk_blood_units_donor_id\" on table \"blood_units\""
                .to_string(),
        );
        assert!(is_foreign_key_violation(&pg_err));

        let sqlite_err = DbErr::Custom("FOREIGN KEY constraint failed".to_string());
        assert!(is_foreign_key_violation(&sqlite_err));

        let other = DbErr::Custom("connection reset by peer".to_string());
        assert!(!is_foreign_key_violation(&other));
    }

    #[test]
    fn test_db_error_keeps_generic_message() {
        let err = DbErr::Custom("secret internal detail".to_string());
        let api_err = err.to_api_error("Failed to fetch donors");
        assert_eq!(
            api_err,
            ApiError::Internal("Failed to fetch donors".to_string())
        );
    }
}
