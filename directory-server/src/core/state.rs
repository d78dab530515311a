use std::time::Instant;

use crate::core::{Config, ServerError};
use crate::db::{Database, DbService};

/// 服务器状态 - 所有请求共享
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | SurrealDB 连接 (内部为 Arc, clone 成本极低) |
/// | started_at | 启动时刻, 用于 /health 的 uptime |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: Database,
    pub started_at: Instant,
}

impl ServerState {
    pub fn new(config: Config, db: Database) -> Self {
        Self {
            config,
            db,
            started_at: Instant::now(),
        }
    }

    /// 连接数据库并应用 schema
    pub async fn initialize(config: &Config) -> Result<Self, ServerError> {
        let db_service = DbService::new(config)
            .await
            .map_err(|e| ServerError::Database(e.message))?;

        Ok(Self::new(config.clone(), db_service.db))
    }
}
