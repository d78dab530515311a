//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`employees`] - 员工管理接口

pub mod convert;
pub mod extract;

pub mod employees;
pub mod health;

use axum::Router;

use crate::core::ServerState;

/// Build the Axum router (without state and middleware)
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(employees::router())
}

// Re-export common types for handlers
pub use crate::utils::AppResult;
