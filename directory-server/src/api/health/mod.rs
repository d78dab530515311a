//! 健康检查
//!
//! `GET /health` 对数据库做一次往返; 数据库不可用时返回 503。
//!
//! ```json
//! { "status": "ok", "version": "0.1.0", "uptimeSeconds": 42,
//!   "database": { "status": "ok", "latencyMs": 1 } }
//! ```

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use std::time::Instant;

use crate::core::ServerState;
use crate::db::DbService;

pub fn router() -> Router<ServerState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// ok | degraded
    status: &'static str,
    version: &'static str,
    uptime_seconds: u64,
    database: DatabaseCheck,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
enum DatabaseCheck {
    #[serde(rename_all = "camelCase")]
    Ok { latency_ms: u64 },
    Error { message: String },
}

async fn health(State(state): State<ServerState>) -> (StatusCode, Json<HealthResponse>) {
    let probe_started = Instant::now();
    let database = match DbService::ping(&state.db).await {
        Ok(()) => DatabaseCheck::Ok {
            latency_ms: probe_started.elapsed().as_millis() as u64,
        },
        Err(e) => DatabaseCheck::Error { message: e.message },
    };

    let (code, status) = match database {
        DatabaseCheck::Ok { .. } => (StatusCode::OK, "ok"),
        DatabaseCheck::Error { .. } => (StatusCode::SERVICE_UNAVAILABLE, "degraded"),
    };

    let body = HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        database,
    };
    (code, Json(body))
}
