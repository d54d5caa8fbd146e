//! Trabajos Server - 有序 item 存储
//!
//! # 架构概述
//!
//! - **数据库** (`db`): SQLite (sqlx)，`sort_order` 列在每次写入后保持 `1..N`
//! - **HTTP API** (`api`): `/items` 的 list / create / get / update / delete / reorder
//! - **核心** (`core`): 配置、共享状态、HTTP 服务器
//!
//! # 模块结构
//!
//! ```text
//! trabajos-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── middleware/    # 请求日志
//! ├── utils/         # 日志
//! └── db/            # 连接池、迁移和仓储
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod middleware;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerError, ServerState};
pub use db::DbService;
pub use shared::{AppError, AppResult, ErrorBody, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{cleanup_old_logs, init_logger_with_file};

/// 进程环境初始化
///
/// 1. 加载 `.env` (不存在时忽略)
/// 2. 读取配置
/// 3. 初始化日志
pub fn setup_environment() -> anyhow::Result<Config> {
    if let Err(e) = dotenv::dotenv()
        && !e.not_found()
    {
        anyhow::bail!("Failed to load .env: {e}");
    }

    let config = Config::from_env();
    init_logger_with_file(&config.log_level, config.log_json, config.log_dir.as_deref())?;

    tracing::info!(
        environment = %config.environment,
        work_dir = %config.work_dir,
        port = config.http_port,
        "Environment ready"
    );
    Ok(config)
}
