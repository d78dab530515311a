//! [`AppError`] and its JSON body

use super::codes::ErrorCode;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Error returned by every handler and extractor
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    /// Field-level messages or the offending value, keyed by name
    pub details: Option<Map<String, Value>>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    pub fn employee_not_found(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::with_message(
            ErrorCode::EmployeeNotFound,
            format!("Employee {} not found", id),
        )
        .with_detail("id", id)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut err = AppError::validation("Validation failed");
        for (field, field_errors) in errors.field_errors() {
            let messages: Vec<Value> = field_errors
                .iter()
                .map(|e| match &e.message {
                    Some(msg) => Value::String(msg.to_string()),
                    None => Value::String(e.code.to_string()),
                })
                .collect();
            err = err.with_detail(field.to_string(), Value::Array(messages));
        }
        err
    }
}

/// Wire shape of an [`AppError`]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody<'a> {
    pub code: ErrorCode,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<&'a Map<String, Value>>,
}

impl<'a> From<&'a AppError> for ErrorBody<'a> {
    fn from(err: &'a AppError) -> Self {
        Self {
            code: err.code,
            message: &err.message,
            details: err.details.as_ref(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.code.is_system() {
            tracing::error!(code = %self.code, message = %self.message, "System error occurred");
        }

        let body = axum::Json(ErrorBody::from(&self)).into_response();
        (self.http_status(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use validator::Validate;

    #[derive(Validate)]
    struct Signup {
        #[validate(email(message = "must be a valid email"))]
        email: String,
        #[validate(length(min = 1))]
        name: String,
    }

    #[test]
    fn test_employee_not_found_carries_id() {
        let err = AppError::employee_not_found("employee:ghost");
        assert_eq!(err.code, ErrorCode::EmployeeNotFound);
        assert_eq!(err.message, "Employee employee:ghost not found");
        assert_eq!(err.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(err.details.unwrap()["id"], "employee:ghost");
    }

    #[test]
    fn test_from_validation_errors_collects_fields() {
        let signup = Signup {
            email: "not-an-email".into(),
            name: String::new(),
        };
        let err: AppError = signup.validate().unwrap_err().into();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details["email"], json!(["must be a valid email"]));
        assert_eq!(details["name"], json!(["length"]));
    }

    #[test]
    fn test_error_body_shape() {
        let err = AppError::with_message(ErrorCode::EmployeeEmailExists, "taken")
            .with_detail("email", "a@b.c");
        let body = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(
            body,
            json!({
                "code": 8002,
                "message": "taken",
                "details": { "email": "a@b.c" },
            })
        );

        let plain = serde_json::to_value(ErrorBody::from(&AppError::internal("boom"))).unwrap();
        assert_eq!(plain, json!({ "code": 9001, "message": "boom" }));
    }
}
