//! Shared types for the employee directory
//!
//! API models (String ids, camelCase JSON), the unified error type and
//! small utilities used by the server and its clients.

pub mod error;
pub mod models;
pub mod util;

pub use error::{AppError, AppResult, ErrorCode};
