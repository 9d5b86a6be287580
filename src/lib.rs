//! # 用户管理 REST API
//!
//! 基于 Axum 的内存版用户 CRUD 服务，包括：
//! - 内存存储 + 单调递增的用户 ID 分配
//! - 统一的 JSON 响应与错误处理
//! - 请求日志与可配置的绑定地址

pub mod app;
pub mod core;
pub mod infrastructure;
pub mod routes;

pub use app::users::handler::AppState;
pub use app::users::service::UserService;
pub use routes::router;
