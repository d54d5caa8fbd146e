//! 工具模块
//!
//! - [`logger`] - 日志初始化和清理

pub mod logger;

pub use logger::{LOG_RETENTION_DAYS, cleanup_old_logs, init_logger_with_file};
