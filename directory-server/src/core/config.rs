/// 服务器配置 - 目录服务的所有配置项
///
/// # 环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT (PORT) | 5000 | HTTP 服务端口 |
/// | DATABASE_URL | mem:// | SurrealDB 连接字符串 |
/// | DB_NAMESPACE | directory | SurrealDB namespace |
/// | DB_DATABASE | directory | SurrealDB database |
/// | DB_USERNAME / DB_PASSWORD | - | 远程数据库 root 凭据 |
/// | CORS_ORIGIN | - | 允许的跨域来源 (逗号分隔, `*` 表示全部) |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | - | 日志文件目录 |
///
/// # 示例
///
/// ```ignore
/// DATABASE_URL=rocksdb://./data HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// SurrealDB 连接字符串 (mem://, rocksdb://path, ws://host:port)
    pub database_url: String,
    pub db_namespace: String,
    pub db_database: String,
    /// Root credentials, only used when both are set
    pub db_username: Option<String>,
    pub db_password: Option<String>,
    /// 允许的跨域来源
    pub cors: CorsConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    pub log_level: String,
    pub log_dir: Option<String>,
}

/// Cross-origin policy
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsConfig {
    /// Allow all origins (development mode)
    #[default]
    AllowAll,
    /// Allow specific origins
    AllowOrigins(Vec<String>),
}

impl CorsConfig {
    /// Parse `CORS_ORIGIN`: unset, empty or `*` allows everything
    pub fn parse(value: Option<&str>) -> Self {
        let origins: Vec<String> = value
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() || origins.iter().any(|o| o == "*") {
            CorsConfig::AllowAll
        } else {
            CorsConfig::AllowOrigins(origins)
        }
    }
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: env_opt("HTTP_PORT")
                .or_else(|| env_opt("PORT"))
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            database_url: env_opt("DATABASE_URL").unwrap_or_else(|| "mem://".into()),
            db_namespace: env_opt("DB_NAMESPACE").unwrap_or_else(|| "directory".into()),
            db_database: env_opt("DB_DATABASE").unwrap_or_else(|| "directory".into()),
            db_username: env_opt("DB_USERNAME"),
            db_password: env_opt("DB_PASSWORD"),
            cors: CorsConfig::parse(env_opt("CORS_ORIGIN").as_deref()),
            environment: env_opt("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            log_level: env_opt("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: env_opt("LOG_DIR"),
        }
    }

    /// In-memory database, permissive CORS
    ///
    /// 常用于测试场景
    pub fn in_memory() -> Self {
        Self {
            http_port: 0,
            database_url: "mem://".into(),
            db_namespace: "test".into(),
            db_database: "test".into(),
            db_username: None,
            db_password: None,
            cors: CorsConfig::AllowAll,
            environment: "test".into(),
            log_level: "info".into(),
            log_dir: None,
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
