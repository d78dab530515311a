//! Unified error system
//!
//! Every failed request answers with the same body:
//!
//! ```json
//! { "code": 8001, "message": "Employee employee:x not found", "details": { "id": "employee:x" } }
//! ```
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::validation("Invalid email format").with_detail("field", "email");
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//! assert_eq!(err.http_status(), http::StatusCode::BAD_REQUEST);
//! ```

mod codes;
mod http;
mod types;

pub use codes::ErrorCode;
pub use types::{AppError, AppResult, ErrorBody};
