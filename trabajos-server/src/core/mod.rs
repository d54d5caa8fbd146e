//! 核心模块 - 配置、共享状态、启动错误和 HTTP 服务器
//!
//! # 模块结构
//!
//! - [`Config`] - 环境变量配置
//! - [`ServerState`] - 配置 + 数据库连接池
//! - [`Server`] - 监听端口并挂载路由
//! - [`ServerError`] - 进程级错误 (请求级错误见 `shared::AppError`)

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
