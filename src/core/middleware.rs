//! 核心中间件模块

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::info;

/// 请求日志中间件，记录方法、路径、状态码和耗时
pub async fn log_requests(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    let response = next.run(req).await;

    info!(
        %method,
        %uri,
        status = %response.status(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "请求处理完成"
    );

    response
}
