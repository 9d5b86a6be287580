//! 日志基础设施

use tracing::Level;
use tracing_subscriber::EnvFilter;

pub struct Logger;

impl Logger {
    /// 初始化日志系统，`RUST_LOG` 环境变量优先于默认级别
    pub fn init(default_level: Level) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level.to_string()));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
