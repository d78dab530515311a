//! Error codes carried in every error body
//!
//! - 0xxx: request errors
//! - 8xxx: employee errors
//! - 9xxx: system errors

use serde::Serialize;
use std::fmt;

/// Stable numeric error code, serialized as a bare number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: Request ====================
    /// Field-level validation failed
    ValidationFailed = 2,
    /// Body or query string could not be parsed
    InvalidRequest = 5,

    // ==================== 8xxx: Employee ====================
    EmployeeNotFound = 8001,
    /// Email already used by another employee
    EmployeeEmailExists = 8002,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    DatabaseError = 9002,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// 9xxx codes: server-side failures, logged when turned into a response
    pub const fn is_system(&self) -> bool {
        self.code() >= 9000
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_padded() {
        assert_eq!(ErrorCode::ValidationFailed.to_string(), "E0002");
        assert_eq!(ErrorCode::EmployeeNotFound.to_string(), "E8001");
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&ErrorCode::EmployeeEmailExists).unwrap();
        assert_eq!(json, "8002");
    }

    #[test]
    fn test_system_range() {
        assert!(ErrorCode::DatabaseError.is_system());
        assert!(ErrorCode::InternalError.is_system());
        assert!(!ErrorCode::EmployeeNotFound.is_system());
        assert!(!ErrorCode::InvalidRequest.is_system());
    }
}
