//! 用户接口处理器

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::Value;

use super::model::{
    CreateUserRequest, DeletedUserResponse, UpdateUserRequest, UserListResponse,
    UserMessageResponse, UserResponse,
};
use super::service::UserService;
use crate::core::error::CoreError;

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
}

/// 路径中的用户 ID 必须是整数，否则按路由不存在处理
fn parse_user_id(raw: &str) -> Result<u64, CoreError> {
    raw.parse::<u64>().map_err(|_| CoreError::EndpointNotFound)
}

/// 请求体缺失或无法解析时转换为校验错误
fn invalid_body(rejection: JsonRejection) -> CoreError {
    match rejection {
        JsonRejection::JsonDataError(err) => CoreError::Validation(err.body_text()),
        _ => CoreError::Validation("No JSON data provided".to_string()),
    }
}

/// API 信息
pub async fn api_info() -> Json<Value> {
    Json(serde_json::json!({
        "success": true,
        "message": "User Management REST API",
        "version": "1.0.0",
        "endpoints": {
            "GET /": "API information",
            "GET /users": "Get all users",
            "GET /users/{id}": "Get specific user",
            "POST /users": "Create new user",
            "PUT /users/{id}": "Update user",
            "DELETE /users/{id}": "Delete user"
        },
        "example_usage": {
            "create_user": {
                "method": "POST",
                "url": "/users",
                "body": {
                    "name": "John Doe",
                    "email": "john@example.com",
                    "age": 30,
                    "phone": "+1234567890"
                }
            }
        }
    }))
}

/// 获取所有用户
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<UserListResponse>, CoreError> {
    let users = state.user_service.list()?;
    Ok(Json(UserListResponse {
        success: true,
        count: users.len(),
        users,
    }))
}

/// 获取特定用户
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, CoreError> {
    let id = parse_user_id(&id)?;
    let user = state.user_service.get(id)?;
    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}

/// 创建新用户
pub async fn create_user(
    State(state): State<AppState>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserMessageResponse>), CoreError> {
    let Json(payload) = payload.map_err(invalid_body)?;
    let user = state.user_service.create(payload)?;
    Ok((
        StatusCode::CREATED,
        Json(UserMessageResponse {
            success: true,
            message: "User created successfully".to_string(),
            user,
        }),
    ))
}

/// 更新用户
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<UserMessageResponse>, CoreError> {
    let id = parse_user_id(&id)?;
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            // 用户不存在时 404 优先于请求体错误
            state.user_service.get(id)?;
            return Err(invalid_body(rejection));
        }
    };
    let user = state.user_service.update(id, payload)?;
    Ok(Json(UserMessageResponse {
        success: true,
        message: "User updated successfully".to_string(),
        user,
    }))
}

/// 删除用户
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletedUserResponse>, CoreError> {
    let id = parse_user_id(&id)?;
    let deleted_user = state.user_service.delete(id)?;
    Ok(Json(DeletedUserResponse {
        success: true,
        message: "User deleted successfully".to_string(),
        deleted_user,
    }))
}

/// 未匹配任何路由
pub async fn endpoint_not_found() -> CoreError {
    CoreError::EndpointNotFound
}

/// 路由存在但方法不支持
pub async fn method_not_allowed() -> CoreError {
    CoreError::MethodNotAllowed
}
