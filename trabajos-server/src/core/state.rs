use sqlx::SqlitePool;

use crate::core::{Config, Result, ServerError};
use crate::db::DbService;

/// 服务器状态 - 持有所有服务的共享引用
///
/// 克隆成本极低 (连接池内部为 Arc)，直接作为 axum 的 State 使用。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | db | SQLite 连接池 |
/// | started_at | 启动时间 (unix millis)，用于 uptime |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub started_at: i64,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 1. 创建工作目录结构
    /// 2. 打开数据库并执行迁移
    pub async fn initialize(config: &Config) -> Result<Self> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| ServerError::Config(format!("Failed to create work dir: {e}")))?;

        let db = DbService::new(&config.database_location()).await?;

        Ok(Self {
            config: config.clone(),
            db,
            started_at: shared::util::now_millis(),
        })
    }

    /// 连接池快捷访问
    pub fn pool(&self) -> &SqlitePool {
        &self.db.pool
    }

    /// 运行时长 (秒)
    pub fn uptime_seconds(&self) -> u64 {
        let elapsed = shared::util::now_millis() - self.started_at;
        (elapsed.max(0) / 1000) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_initialize_in_memory() {
        let state = ServerState::initialize(&Config::in_memory()).await.unwrap();
        assert!(state.db.ping().await.is_ok());
        assert!(state.uptime_seconds() < 5);
    }

    #[tokio::test]
    async fn test_initialize_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_overrides(dir.path().to_string_lossy(), 0);
        let state = ServerState::initialize(&config).await.unwrap();
        assert!(state.db.ping().await.is_ok());
        assert!(config.database_dir().join("trabajos.db").exists());
    }
}
