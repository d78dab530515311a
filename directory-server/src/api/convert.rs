//! 类型转换模块
//!
//! 将数据库模型 (db::models) 转换为 API 响应模型 (shared::models)

use crate::db::models as db;
use shared::models as api;

// ============ Employee ============

impl From<db::Employee> for api::EmployeeResponse {
    fn from(e: db::Employee) -> Self {
        Self {
            id: e.id.to_string(),
            name: e.name,
            description: e.description,
            email: e.email,
            phone: e.phone,
            reports_to: e.reports_to.as_ref().map(ToString::to_string),
            image: e.image,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

impl From<db::Employee> for api::EmployeeSummary {
    fn from(e: db::Employee) -> Self {
        Self {
            id: e.id.to_string(),
            name: e.name,
        }
    }
}

impl From<db::EmployeeName> for api::EmployeeSummary {
    fn from(e: db::EmployeeName) -> Self {
        Self {
            id: e.id.to_string(),
            name: e.name,
        }
    }
}
