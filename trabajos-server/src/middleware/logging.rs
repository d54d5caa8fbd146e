//! 请求日志中间件
//!
//! 每个请求结束时记录一行：请求 ID、路由、状态码、延迟，
//! 失败时附带响应体里的业务错误码 (由 `AppError` 写入响应扩展)。

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use http::StatusCode;
use shared::ErrorCode;
use std::time::Instant;
use tracing::{debug, info, warn};

/// 请求结果分类
fn outcome(status: StatusCode) -> &'static str {
    if status.is_server_error() {
        "server_error"
    } else if status.is_client_error() {
        "client_error"
    } else {
        "ok"
    }
}

/// 请求日志中间件
///
/// 4xx/5xx 以 warn 级别记录，其余为 info。
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();

    let request_id = req
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let method = req.method().clone();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    debug!(request_id = %request_id, method = %method, route = %route, "Request started");

    let response = next.run(req).await;

    let status = response.status();
    let latency_ms = start.elapsed().as_millis() as u64;
    let outcome = outcome(status);

    match response.extensions().get::<ErrorCode>() {
        Some(code) => warn!(
            request_id = %request_id,
            method = %method,
            route = %route,
            status = status.as_u16(),
            error_code = code.code(),
            latency_ms,
            outcome,
            "Request failed"
        ),
        None if outcome != "ok" => warn!(
            request_id = %request_id,
            method = %method,
            route = %route,
            status = status.as_u16(),
            latency_ms,
            outcome,
            "Request failed"
        ),
        None => info!(
            request_id = %request_id,
            method = %method,
            route = %route,
            status = status.as_u16(),
            latency_ms,
            "Request completed"
        ),
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_by_status_class() {
        assert_eq!(outcome(StatusCode::OK), "ok");
        assert_eq!(outcome(StatusCode::NO_CONTENT), "ok");
        assert_eq!(outcome(StatusCode::NOT_FOUND), "client_error");
        assert_eq!(outcome(StatusCode::SERVICE_UNAVAILABLE), "server_error");
    }
}
