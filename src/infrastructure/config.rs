//! 服务配置

use std::env;
use std::net::SocketAddr;

/// HTTP 服务配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// 绑定地址
    pub bind_address: String,
    /// 服务端口
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 5000,
        }
    }
}

impl ServerConfig {
    /// 从环境变量加载配置，未设置的项使用默认值
    ///
    /// 支持 `BIND_ADDR`（绑定地址）和 `PORT`（端口）。
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(addr) = env::var("BIND_ADDR") {
            config.bind_address = addr;
        }
        if let Ok(port) = env::var("PORT") {
            config.port = port
                .parse()
                .map_err(|_| ConfigError::Parse(format!("无效的端口: {}", port)))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }
        if self.port == 0 {
            return Err(ConfigError::Validation("端口必须大于0".to_string()));
        }
        Ok(())
    }

    /// 解析为套接字地址
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .map_err(|_| {
                ConfigError::Parse(format!(
                    "无效的绑定地址: {}:{}",
                    self.bind_address, self.port
                ))
            })
    }
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}
