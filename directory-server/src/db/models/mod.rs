//! Database Models

pub mod employee;

// Re-exports
pub use employee::{EMPLOYEE_TABLE, Employee, EmployeeId, EmployeeName};
