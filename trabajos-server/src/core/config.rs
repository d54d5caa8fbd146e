use std::path::PathBuf;

/// Database location that keeps everything in memory (tests, demos)
pub const IN_MEMORY_DATABASE: &str = ":memory:";

/// 服务器配置 - item store 的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/trabajos | 工作目录 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | DATABASE_PATH | $WORK_DIR/database/trabajos.db | SQLite 文件 (`:memory:` 为内存库) |
/// | ENVIRONMENT | development | 运行环境 |
/// | LOG_LEVEL | info | 日志级别 (RUST_LOG 优先) |
/// | LOG_JSON | false | JSON 格式日志 |
/// | LOG_DIR | (none) | 日志文件目录 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/trabajos HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 数据库文件路径，None 时使用 work_dir 下的默认位置
    pub database_path: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 日志级别
    pub log_level: String,
    /// 是否输出 JSON 日志
    pub log_json: bool,
    /// 日志文件目录
    pub log_dir: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/trabajos".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path: std::env::var("DATABASE_PATH").ok(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config.database_path = None;
        config
    }

    /// 内存数据库配置 (测试用)
    pub fn in_memory() -> Self {
        let mut config = Self::from_env();
        config.database_path = Some(IN_MEMORY_DATABASE.to_string());
        config.log_dir = None;
        config
    }

    /// 数据库目录
    pub fn database_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("database")
    }

    /// 实际使用的数据库路径
    pub fn database_location(&self) -> String {
        match &self.database_path {
            Some(path) => path.clone(),
            None => self
                .database_dir()
                .join("trabajos.db")
                .to_string_lossy()
                .into_owned(),
        }
    }

    /// 是否使用内存数据库
    pub fn is_in_memory(&self) -> bool {
        self.database_location() == IN_MEMORY_DATABASE
    }

    /// 确保工作目录结构存在
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        if self.is_in_memory() {
            return Ok(());
        }
        if let Some(parent) = PathBuf::from(self.database_location()).parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_database_lives_in_work_dir() {
        let config = Config::with_overrides("/tmp/trabajos-test", 0);
        assert_eq!(
            PathBuf::from(config.database_location()),
            PathBuf::from("/tmp/trabajos-test/database/trabajos.db")
        );
        assert!(!config.is_in_memory());
    }

    #[test]
    fn test_in_memory_skips_directories() {
        let config = Config::in_memory();
        assert!(config.is_in_memory());
        assert!(config.ensure_work_dir_structure().is_ok());
    }

    #[test]
    fn test_work_dir_structure_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_overrides(dir.path().to_string_lossy(), 0);
        config.ensure_work_dir_structure().unwrap();
        assert!(config.database_dir().is_dir());
    }
}
