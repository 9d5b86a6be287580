//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::error;

/// 核心错误类型，每个变体对应一个 HTTP 状态码
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// 请求体缺失、无法解析或字段校验失败
    #[error("{0}")]
    Validation(String),
    /// 邮箱与已有记录冲突
    #[error("{0}")]
    Conflict(String),
    /// 指定 ID 的记录不存在
    #[error("{0}")]
    NotFound(String),
    /// 路由不存在（含路径段非整数的情况）
    #[error("Endpoint not found")]
    EndpointNotFound,
    /// 路由存在但方法不支持
    #[error("Method not allowed")]
    MethodNotAllowed,
    /// 未预期的内部故障
    #[error("{0}")]
    Internal(String),
}

/// 错误响应结构
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = match &self {
            CoreError::Validation(_) => StatusCode::BAD_REQUEST,
            CoreError::Conflict(_) => StatusCode::CONFLICT,
            CoreError::NotFound(_) | CoreError::EndpointNotFound => StatusCode::NOT_FOUND,
            CoreError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            CoreError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let CoreError::Internal(msg) = &self {
            error!("内部错误: {}", msg);
        }

        let body = ErrorResponse {
            success: false,
            message: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
