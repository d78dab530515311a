//! Employee Model

use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Employee ID type
pub type EmployeeId = RecordId;

/// Table name
pub const EMPLOYEE_TABLE: &str = "employee";

/// Employee model matching the SurrealDB `employee` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Manager link, NONE for top-level employees
    #[serde(default)]
    pub reports_to: Option<EmployeeId>,
    #[serde(default)]
    pub image: Option<String>,
    /// Unix millis
    #[serde(default)]
    pub created_at: i64,
    /// Unix millis
    #[serde(default)]
    pub updated_at: i64,
}

/// `SELECT id, name` projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeName {
    pub id: EmployeeId,
    pub name: String,
}
