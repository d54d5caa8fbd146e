//! 健康检查路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /health | GET | 版本、运行时间和数据库状态 |
//!
//! ```json
//! { "status": "ok", "version": "0.1.0", "uptimeSeconds": 42, "database": "ok" }
//! ```

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;

use crate::core::ServerState;

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
    /// ok | error
    database: &'static str,
}

/// GET /health
///
/// 数据库不可用时返回 503，body 结构不变
async fn health(State(state): State<ServerState>) -> (StatusCode, Json<HealthResponse>) {
    let database_ok = match state.db.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "Health check: database unreachable");
            false
        }
    };

    let status = if database_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthResponse {
            status: if database_ok { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            uptime_seconds: state.uptime_seconds(),
            database: if database_ok { "ok" } else { "error" },
        }),
    )
}
