//! 日志初始化
//!
//! - 控制台: 开发环境为可读格式, 生产环境为 JSON
//! - 设置 `LOG_DIR` 时额外写入按天滚动的 JSON 日志文件
//! - `RUST_LOG` 优先于 `LOG_LEVEL`

use std::fs;
use tracing_appender::rolling;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::core::Config;

/// Rolling file name prefix, files end up as `directory-server.log.YYYY-MM-DD`
const LOG_FILE_PREFIX: &str = "directory-server.log";

/// `LOG_LEVEL` plus a quieter default for the database engine
fn default_directives(level: &str) -> String {
    format!("{level},surrealdb=warn,surrealdb_core=warn")
}

/// Install the global subscriber described by `config`
///
/// Fails if a subscriber is already installed or the log directory cannot
/// be created.
pub fn init_logger(config: &Config) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directives(&config.log_level)))?;

    let console = if config.is_production() {
        fmt::layer().json().with_current_span(true).boxed()
    } else {
        fmt::layer().with_target(true).with_line_number(true).boxed()
    };

    let file = match config.log_dir.as_deref() {
        Some(dir) => {
            fs::create_dir_all(dir)?;
            let appender = rolling::daily(dir, LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .json()
                    .with_ansi(false)
                    .with_writer(appender)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()?;

    if let Some(dir) = &config.log_dir {
        tracing::info!(dir = %dir, "File logging enabled");
    }
    Ok(())
}
