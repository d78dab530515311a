//! Repository Module
//!
//! Provides CRUD and query operations over SurrealDB tables.

pub mod employee;

// Re-exports
pub use employee::EmployeeRepository;

use shared::{AppError, ErrorCode};
use surrealdb::RecordId;
use thiserror::Error;

use super::Database;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    /// Carries the id as the client sent it
    #[error("Employee {0} not found")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Unique index violation, e.g. two concurrent creates with one email.
///
/// Embedded engines report a typed error; remote engines only forward the
/// server's message text.
fn is_unique_violation(err: &surrealdb::Error) -> bool {
    match err {
        surrealdb::Error::Db(surrealdb::error::Db::IndexExists { .. }) => true,
        other => other.to_string().contains("already contains"),
    }
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        if is_unique_violation(&err) {
            RepoError::Duplicate(err.to_string())
        } else {
            RepoError::Database(err.to_string())
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(id) => AppError::employee_not_found(id),
            RepoError::Duplicate(msg) => {
                AppError::with_message(ErrorCode::EmployeeEmailExists, msg)
            }
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: 全栈统一使用 "table:key" 格式
// =============================================================================
//
//   - 解析: parse_record_id("employee", "employee:abc") 或 ("employee", "abc")
//   - 创建: RecordId::from_table_key("employee", "abc"), key 始终为字符串
//   - 输出: id.to_string() => "employee:abc" (特殊 key 带 ⟨⟩)

/// Parse an API id into a [`RecordId`] of `table`
///
/// Accepts `table:key` and a bare `key`; any other table prefix is rejected.
/// Both forms always yield a string key, so `employee:123` and `123` name
/// the same record.
pub fn parse_record_id(table: &str, raw: &str) -> RepoResult<RecordId> {
    let raw = raw.trim();
    let key = match raw.strip_prefix(table).and_then(|rest| rest.strip_prefix(':')) {
        Some(key) => key,
        None if raw.contains(':') => {
            return Err(RepoError::Validation(format!(
                "Invalid ID: {} (expected {}:<key>)",
                raw, table
            )));
        }
        None => raw,
    };

    let key = unescape_key(key);
    if key.is_empty() {
        return Err(RepoError::Validation(format!("Invalid ID: '{}'", raw)));
    }
    Ok(RecordId::from_table_key(table, key))
}

/// Strip the `⟨…⟩` / backtick quoting SurrealDB adds when rendering keys
fn unescape_key(key: &str) -> &str {
    key.strip_prefix('⟨')
        .and_then(|k| k.strip_suffix('⟩'))
        .or_else(|| key.strip_prefix('`').and_then(|k| k.strip_suffix('`')))
        .unwrap_or(key)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Database,
}

impl BaseRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }
}
