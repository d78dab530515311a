//! Employee API Module
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /employees | POST | 创建员工 |
//! | /employees/simple | GET | id + name 列表 |
//! | /employees/hierarchy | GET | 汇报关系树 |
//! | /employees/search | GET | 分页搜索 |
//! | /employees/{id} | GET / PUT / DELETE | 单个员工 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Employee router
pub fn router() -> Router<ServerState> {
    // 静态路径优先于 /{id}
    Router::new()
        .route("/employees", post(handler::create))
        .route("/employees/simple", get(handler::list_simple))
        .route("/employees/hierarchy", get(handler::hierarchy))
        .route("/employees/search", get(handler::search))
        .route(
            "/employees/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
}
