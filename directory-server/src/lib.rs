//! Employee Directory Server - 员工目录 HTTP 服务
//!
//! # 架构概述
//!
//! 基于 SurrealDB 的员工 CRUD、汇报关系树和分页搜索接口。
//!
//! # 模块结构
//!
//! ```text
//! directory-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── api/           # HTTP 路由、提取器和处理器
//! ├── middleware/    # 请求日志
//! ├── services/      # 汇报关系树、HTTP 服务
//! ├── utils/         # 日志等工具
//! └── db/            # 数据库连接、模型、仓储、搜索构建
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod middleware;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use services::build_app;
pub use utils::{AppError, AppResult};

pub use utils::logger::init_logger;

/// 设置运行环境: 读取 .env 并初始化日志
pub fn setup_environment() -> anyhow::Result<()> {
    // .env 是可选的
    let _ = dotenv::dotenv();

    init_logger(&Config::from_env())
}

pub fn print_banner() {
    println!(
        r#"
    ____  _                __
   / __ \(_)_______  _____/ /_____  _______  __
  / / / / / ___/ _ \/ ___/ __/ __ \/ ___/ / / /
 / /_/ / / /  /  __/ /__/ /_/ /_/ / /  / /_/ /
/_____/_/_/   \___/\___/\__/\____/_/   \__, /
                                      /____/
    "#
    );
}
