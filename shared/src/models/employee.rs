//! Employee Model

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Entity names (employee name)
pub const MAX_NAME_LEN: u64 = 200;
/// Free-form descriptions
pub const MAX_NOTE_LEN: u64 = 500;
/// Short identifiers such as phone numbers
pub const MAX_SHORT_TEXT_LEN: u64 = 100;
/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: u64 = 254;
/// URLs / image paths
pub const MAX_URL_LEN: u64 = 2048;

/// Employee response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    /// Record id, `employee:<key>`
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    /// Manager reference (String ID)
    pub reports_to: Option<String>,
    pub image: Option<String>,
    /// Unix millis
    pub created_at: i64,
    /// Unix millis
    pub updated_at: i64,
}

/// Employee with its manager resolved (read-by-id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeDetail {
    #[serde(flatten)]
    pub employee: EmployeeResponse,
    /// `None` when `reportsTo` is empty or dangling
    pub manager: Option<EmployeeSummary>,
}

/// Id + name projection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub id: String,
    pub name: String,
}

/// Node of the reporting forest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeNode {
    #[serde(flatten)]
    pub employee: EmployeeResponse,
    pub children: Vec<EmployeeNode>,
}

// Chains can be arbitrarily deep: tear down iteratively.
impl Drop for EmployeeNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Rejects empty and whitespace-only strings; values are stored trimmed
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Create employee payload
///
/// Required fields default to empty so that a missing field is reported by
/// validation with a field-level message instead of a JSON parse error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreate {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "name is required"),
        length(max = MAX_NAME_LEN)
    )]
    pub name: String,
    #[validate(length(max = MAX_NOTE_LEN))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(
        length(max = MAX_EMAIL_LEN),
        email(message = "email must be a valid address")
    )]
    pub email: String,
    #[validate(length(max = MAX_SHORT_TEXT_LEN))]
    pub phone: Option<String>,
    /// Manager reference (String ID)
    pub reports_to: Option<String>,
    #[validate(length(max = MAX_URL_LEN))]
    pub image: Option<String>,
}

/// Update employee payload
///
/// Replaces every mutable field: an absent or null optional clears it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    #[serde(default)]
    #[validate(
        custom(function = "not_blank", message = "name is required"),
        length(max = MAX_NAME_LEN)
    )]
    pub name: String,
    #[validate(length(max = MAX_NOTE_LEN))]
    pub description: Option<String>,
    #[serde(default)]
    #[validate(
        length(max = MAX_EMAIL_LEN),
        email(message = "email must be a valid address")
    )]
    pub email: String,
    #[validate(length(max = MAX_SHORT_TEXT_LEN))]
    pub phone: Option<String>,
    /// Manager reference (String ID), `null` makes the employee a root
    pub reports_to: Option<String>,
}
