//! Application error type and its JSON envelope.
//!
//! Every handler returns `Result<_, AppError>`. Errors are rendered as
//!
//! ```json
//! { "error": { "name": "NotFoundError", "message": "Not found!", "details": { ... } } }
//! ```
//!
//! `details` is `null` when the error carries no structured context.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::entities::Car;

/// Response wrapper: `{"error": {...}}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorInfo,
}

/// Serialized form of an [`AppError`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorInfo {
    pub name: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors surfaced by services and handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request input failed validation (422).
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Persistence rejected a create/update (422).
    #[error("{message}")]
    Unprocessable { message: String, details: Value },

    /// Resource or route does not exist (404).
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Car is flagged rented or has an overlapping booking (422).
    #[error("{message}")]
    CarAlreadyRented { message: String, details: Value },

    /// Missing, unknown or revoked credentials (401).
    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    /// Authenticated user lacks the required role (403).
    #[error("{message}")]
    Forbidden { message: String, details: Value },

    /// Anything else (500).
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn validation(message: impl Into<String>, details: Value) -> Self {
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

    /// Not-found error for an unmatched route.
    pub fn route_not_found(method: &str, url: &str) -> Self {
        Self::not_found("Not found!", json!({ "method": method, "url": url }))
    }

    /// Rejection for a car that cannot be rented for the requested interval.
    pub fn car_already_rented(car: &Car) -> Self {
        Self::CarAlreadyRented {
            message: format!("{} is already rented!!", car.name),
            details: json!({ "car": car }),
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn forbidden(message: impl Into<String>, details: Value) -> Self {
        Self::Forbidden {
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

    /// Downgrades an internal failure to 422 for handlers that answer
    /// mutation failures directly instead of forwarding them.
    ///
    /// Typed errors (not found, validation, ...) pass through untouched.
    pub fn into_unprocessable(self) -> Self {
        match self {
            Self::Internal { message, details } => Self::Unprocessable { message, details },
            other => other,
        }
    }

    /// Error name exposed in the envelope.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "ValidationError",
            Self::Unprocessable { .. } | Self::Internal { .. } => "Error",
            Self::NotFound { .. } => "NotFoundError",
            Self::CarAlreadyRented { .. } => "CarAlreadyRentedError",
            Self::Unauthorized { .. } => "UnauthorizedError",
            Self::Forbidden { .. } => "InsufficientAccessError",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } | Self::Unprocessable { .. } | Self::CarAlreadyRented { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> &Value {
        match self {
            Self::Validation { details, .. }
            | Self::Unprocessable { details, .. }
            | Self::NotFound { details, .. }
            | Self::CarAlreadyRented { details, .. }
            | Self::Unauthorized { details, .. }
            | Self::Forbidden { details, .. }
            | Self::Internal { details, .. } => details,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        ErrorInfo {
            name: self.name(),
            message: self.to_string(),
            details: self.details().clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, details = %self.details(), "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            let details = json!({
                "code": db.code(),
                "constraint": db.constraint(),
            });
            return AppError::internal(db.message().to_string(), details);
        }

        tracing::error!(error = %e, "Database error");
        AppError::internal("Database error", Value::Null)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields: serde_json::Map<String, Value> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages: Vec<String> = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field.to_string(), json!(messages))
            })
            .collect();

        AppError::validation("Validation failed", json!({ "fields": fields }))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation("Invalid request body", json!({ "reason": rejection.body_text() }))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::validation(
            "Invalid query parameters",
            json!({ "reason": rejection.body_text() }),
        )
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::validation("Invalid path parameter", json!({ "reason": rejection.body_text() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn rented_car() -> Car {
        Car {
            id: 1,
            name: "Avanza".to_string(),
            price: 10_000.0,
            size: "small".to_string(),
            image: "test.jpg".to_string(),
            is_currently_rented: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_route_not_found_details() {
        let err = AppError::route_not_found("GET", "/nowhere");
        let info = err.to_error_info();

        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(info.name, "NotFoundError");
        assert_eq!(info.message, "Not found!");
        assert_eq!(info.details, json!({ "method": "GET", "url": "/nowhere" }));
    }

    #[test]
    fn test_car_already_rented_message_and_details() {
        let car = rented_car();
        let err = AppError::car_already_rented(&car);
        let info = err.to_error_info();

        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(info.name, "CarAlreadyRentedError");
        assert_eq!(info.message, "Avanza is already rented!!");
        assert_eq!(info.details["car"]["id"], 1);
        assert_eq!(info.details["car"]["isCurrentlyRented"], true);
    }

    #[test]
    fn test_internal_error_has_null_details() {
        let err = AppError::internal("Error", Value::Null);
        let info = err.to_error_info();

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(info.name, "Error");
        assert!(info.details.is_null());
    }

    #[test]
    fn test_into_unprocessable_only_touches_internal() {
        let err = AppError::internal("boom", Value::Null).into_unprocessable();
        assert!(matches!(err, AppError::Unprocessable { .. }));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.name(), "Error");

        let err = AppError::not_found("missing", Value::Null).into_unprocessable();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[test]
    fn test_forbidden_name() {
        let err = AppError::forbidden("Access forbidden", json!({ "role": "CUSTOMER" }));
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.name(), "InsufficientAccessError");
    }
}
