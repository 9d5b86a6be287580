//! 用户数据模型

use serde::{Deserialize, Serialize};

/// 用户记录
///
/// `id` 在创建时分配且不可变更；`age` 和 `phone` 为可选字段，
/// 缺省时不出现在序列化结果中。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// 创建用户请求
///
/// 必填字段放在服务层校验，以便返回字段级的错误信息；
/// 未识别字段直接拒绝。
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub phone: Option<String>,
}

/// 更新用户请求，只应用出现的字段，未识别字段静默忽略
#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
    pub phone: Option<String>,
}

/// 用户列表响应
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub success: bool,
    pub count: usize,
    pub users: Vec<User>,
}

/// 单个用户响应
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: User,
}

/// 创建 / 更新成功响应
#[derive(Debug, Serialize)]
pub struct UserMessageResponse {
    pub success: bool,
    pub message: String,
    pub user: User,
}

/// 删除成功响应，附带被删除的记录
#[derive(Debug, Serialize)]
pub struct DeletedUserResponse {
    pub success: bool,
    pub message: String,
    pub deleted_user: User,
}
