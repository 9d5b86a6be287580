//! 用户管理 REST API 服务入口

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, Level};

use user_api::infrastructure::config::ServerConfig;
use user_api::infrastructure::logger::Logger;
use user_api::{router, AppState, UserService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    Logger::init(Level::INFO);

    let config = ServerConfig::from_env().context("加载服务配置")?;
    let addr = config.socket_addr().context("解析绑定地址")?;

    let state = AppState {
        user_service: UserService::new(),
    };
    let app = router(state);

    info!("启动 User Management REST API...");
    info!("📖 API 端点:");
    info!("   GET    /           - API 信息");
    info!("   GET    /users      - 获取所有用户");
    info!("   GET    /users/{{id}} - 获取特定用户");
    info!("   POST   /users      - 创建新用户");
    info!("   PUT    /users/{{id}} - 更新用户");
    info!("   DELETE /users/{{id}} - 删除用户");

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;
    info!("🚀 服务器运行在 http://{}", addr);

    axum::serve(listener, app).await.context("服务器运行失败")?;

    Ok(())
}
