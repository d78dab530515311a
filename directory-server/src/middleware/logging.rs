//! 请求日志中间件
//!
//! 每个请求结束时输出一行: request id、路由模板、状态码和耗时。
//! 5xx 记为 error，4xx 记为 warn，健康检查降为 debug。

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tower_http::request_id::RequestId;

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let started = Instant::now();

    // SetRequestIdLayer runs first, so the extension is normally present
    let request_id = req
        .extensions()
        .get::<RequestId>()
        .and_then(|id| id.header_value().to_str().ok())
        .unwrap_or("-")
        .to_string();
    let method = req.method().clone();
    // 路由模板 (/employees/{id}) 比原始路径更适合聚合
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let latency_ms = started.elapsed().as_millis() as u64;

    macro_rules! log_request {
        ($level:ident, $msg:literal) => {
            tracing::$level!(
                request_id = %request_id,
                method = %method,
                route = %route,
                status,
                latency_ms,
                $msg
            )
        };
    }

    match status {
        500.. => log_request!(error, "Request failed"),
        400..500 => log_request!(warn, "Request rejected"),
        _ if route == "/health" => log_request!(debug, "Request completed"),
        _ => log_request!(info, "Request completed"),
    }

    response
}
