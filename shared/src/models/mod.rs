//! API-facing data models (String IDs, camelCase JSON)

pub mod employee;
pub mod search;

pub use employee::{
    EmployeeCreate, EmployeeDetail, EmployeeNode, EmployeeResponse, EmployeeSummary,
    EmployeeUpdate,
};
pub use search::{EmployeeSearch, SearchField, SearchQuery, SearchResponse};
