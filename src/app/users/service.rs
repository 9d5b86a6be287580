//! 用户业务服务：内存存储与 ID 分配

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use tracing::info;

use super::model::{CreateUserRequest, UpdateUserRequest, User};
use crate::core::error::CoreError;

/// 内存存储：ID -> 用户记录，外加单调递增的 ID 计数器
///
/// 使用 BTreeMap 保证列表按 ID（即插入顺序）返回；
/// 删除记录不会回退计数器，ID 永不复用。
struct UserStore {
    users: BTreeMap<u64, User>,
    next_id: u64,
}

/// 用户服务，可克隆的存储句柄
///
/// 每个操作只获取一次锁，查重和写入在同一临界区内完成，
/// 避免并发请求下的 check-then-act 竞争。
#[derive(Clone)]
pub struct UserService {
    store: Arc<Mutex<UserStore>>,
}

impl UserService {
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(UserStore {
                users: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }

    /// 获取所有用户，按插入顺序返回
    pub fn list(&self) -> Result<Vec<User>, CoreError> {
        let store = self.lock("Error listing users")?;
        Ok(store.users.values().cloned().collect())
    }

    /// 获取指定用户
    pub fn get(&self, id: u64) -> Result<User, CoreError> {
        let store = self.lock("Error getting user")?;
        store
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(format!("User with ID {} not found", id)))
    }

    /// 创建用户：校验必填字段和邮箱格式，邮箱查重后分配新 ID
    pub fn create(&self, payload: CreateUserRequest) -> Result<User, CoreError> {
        let name = match payload.name {
            Some(name) if !name.is_empty() => name,
            _ => {
                return Err(CoreError::Validation(
                    "Missing required field: name".to_string(),
                ))
            }
        };
        let email = match payload.email {
            Some(email) if !email.is_empty() => email,
            _ => {
                return Err(CoreError::Validation(
                    "Missing required field: email".to_string(),
                ))
            }
        };
        // 只检查 '@'，不做完整的邮箱语法解析
        if !email.contains('@') {
            return Err(CoreError::Validation("Invalid email format".to_string()));
        }

        let mut store = self.lock("Error creating user")?;

        if store.users.values().any(|user| user.email == email) {
            return Err(CoreError::Conflict("Email already exists".to_string()));
        }

        let id = store.next_id;
        store.next_id += 1;

        let now = Utc::now().to_rfc3339();
        let user = User {
            id,
            name,
            email,
            created_at: now.clone(),
            updated_at: now,
            age: payload.age,
            phone: payload.phone,
        };
        store.users.insert(id, user.clone());

        info!("创建用户: id={}, email={}", user.id, user.email);
        Ok(user)
    }

    /// 更新用户：只应用出现的字段，邮箱查重时排除自身
    pub fn update(&self, id: u64, payload: UpdateUserRequest) -> Result<User, CoreError> {
        let mut store = self.lock("Error updating user")?;

        if !store.users.contains_key(&id) {
            return Err(CoreError::NotFound(format!(
                "User with ID {} not found",
                id
            )));
        }

        if let Some(email) = payload.email.as_ref() {
            let taken = store
                .users
                .iter()
                .any(|(other_id, user)| *other_id != id && user.email == *email);
            if taken {
                return Err(CoreError::Conflict("Email already exists".to_string()));
            }
        }

        let user = store.users.get_mut(&id).ok_or_else(|| {
            CoreError::Internal(format!("Error updating user: record {} vanished", id))
        })?;

        if let Some(name) = payload.name {
            user.name = name;
        }
        if let Some(email) = payload.email {
            user.email = email;
        }
        if let Some(age) = payload.age {
            user.age = Some(age);
        }
        if let Some(phone) = payload.phone {
            user.phone = Some(phone);
        }
        user.updated_at = Utc::now().to_rfc3339();

        info!("更新用户: id={}", id);
        Ok(user.clone())
    }

    /// 删除用户，返回被删除的记录
    pub fn delete(&self, id: u64) -> Result<User, CoreError> {
        let mut store = self.lock("Error deleting user")?;
        let user = store
            .users
            .remove(&id)
            .ok_or_else(|| CoreError::NotFound(format!("User with ID {} not found", id)))?;

        info!("删除用户: id={}", id);
        Ok(user)
    }

    /// 锁被毒化说明持锁线程曾 panic，按内部故障上报而不是跟着崩溃
    fn lock(&self, context: &str) -> Result<MutexGuard<'_, UserStore>, CoreError> {
        self.store
            .lock()
            .map_err(|_| CoreError::Internal(format!("{}: user store lock poisoned", context)))
    }
}

impl Default for UserService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    fn payload(name: &str, email: &str) -> CreateUserRequest {
        CreateUserRequest {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            age: None,
            phone: None,
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let service = UserService::new();

        let first = service.create(payload("张三", "zhangsan@example.com")).unwrap();
        let second = service.create(payload("李四", "lisi@example.com")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[test]
    fn test_create_validates_required_fields() {
        let service = UserService::new();

        let missing_name = CreateUserRequest {
            name: None,
            email: Some("a@b.com".to_string()),
            age: None,
            phone: None,
        };
        let err = service.create(missing_name).unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg == "Missing required field: name"));

        let empty_email = CreateUserRequest {
            name: Some("张三".to_string()),
            email: Some(String::new()),
            age: None,
            phone: None,
        };
        let err = service.create(empty_email).unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg == "Missing required field: email"));

        let err = service.create(payload("张三", "not-an-email")).unwrap_err();
        assert!(matches!(err, CoreError::Validation(msg) if msg == "Invalid email format"));
    }

    #[test]
    fn test_create_rejects_duplicate_email() {
        let service = UserService::new();
        service.create(payload("张三", "zhangsan@example.com")).unwrap();

        let err = service.create(payload("李四", "zhangsan@example.com")).unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[test]
    fn test_get_unknown_id() {
        let service = UserService::new();
        let err = service.get(9999).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(msg) if msg == "User with ID 9999 not found"));
    }

    #[test]
    fn test_update_applies_only_present_fields() {
        let service = UserService::new();
        let created = service.create(payload("张三", "zhangsan@example.com")).unwrap();

        // 保证 updated_at 严格晚于 created_at
        thread::sleep(Duration::from_millis(5));

        let updated = service
            .update(
                created.id,
                UpdateUserRequest {
                    name: None,
                    email: None,
                    age: Some(31),
                    phone: None,
                },
            )
            .unwrap();

        assert_eq!(updated.name, "张三");
        assert_eq!(updated.email, "zhangsan@example.com");
        assert_eq!(updated.age, Some(31));
        assert_eq!(updated.created_at, created.created_at);

        let created_at = chrono::DateTime::parse_from_rfc3339(&updated.created_at).unwrap();
        let updated_at = chrono::DateTime::parse_from_rfc3339(&updated.updated_at).unwrap();
        assert!(updated_at > created_at);
    }

    #[test]
    fn test_update_email_conflict_excludes_self() {
        let service = UserService::new();
        let first = service.create(payload("张三", "zhangsan@example.com")).unwrap();
        service.create(payload("李四", "lisi@example.com")).unwrap();

        // 改回自己的邮箱不算冲突
        let same = service
            .update(
                first.id,
                UpdateUserRequest {
                    name: None,
                    email: Some("zhangsan@example.com".to_string()),
                    age: None,
                    phone: None,
                },
            )
            .unwrap();
        assert_eq!(same.email, "zhangsan@example.com");

        let err = service
            .update(
                first.id,
                UpdateUserRequest {
                    name: None,
                    email: Some("lisi@example.com".to_string()),
                    age: None,
                    phone: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict(_)));
    }

    #[test]
    fn test_update_unknown_id() {
        let service = UserService::new();
        let err = service
            .update(
                42,
                UpdateUserRequest {
                    name: None,
                    email: None,
                    age: None,
                    phone: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[test]
    fn test_delete_removes_record_and_id_is_never_reused() {
        let service = UserService::new();
        let first = service.create(payload("张三", "zhangsan@example.com")).unwrap();
        let second = service.create(payload("李四", "lisi@example.com")).unwrap();

        let deleted = service.delete(second.id).unwrap();
        assert_eq!(deleted.id, second.id);
        assert!(matches!(service.get(second.id), Err(CoreError::NotFound(_))));
        assert!(matches!(service.delete(second.id), Err(CoreError::NotFound(_))));

        // 删除不回收 ID
        let third = service.create(payload("王五", "wangwu@example.com")).unwrap();
        assert_eq!(third.id, 3);

        let users = service.list().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id, first.id);
        assert_eq!(users[1].id, third.id);
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let service = UserService::new();
        service.create(payload("张三", "zhangsan@example.com")).unwrap();
        service.create(payload("李四", "lisi@example.com")).unwrap();
        service.create(payload("王五", "wangwu@example.com")).unwrap();

        let users = service.list().unwrap();
        let names: Vec<&str> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["张三", "李四", "王五"]);
    }

    #[test]
    fn test_optional_fields_roundtrip() {
        let service = UserService::new();
        let user = service
            .create(CreateUserRequest {
                name: Some("张三".to_string()),
                email: Some("zhangsan@example.com".to_string()),
                age: Some(25),
                phone: Some("+1234567890".to_string()),
            })
            .unwrap();

        assert_eq!(user.age, Some(25));
        assert_eq!(user.phone.as_deref(), Some("+1234567890"));

        // 未提供的可选字段不出现在序列化结果中
        let bare = service.create(payload("李四", "lisi@example.com")).unwrap();
        let json = serde_json::to_value(&bare).unwrap();
        assert!(json.get("age").is_none());
        assert!(json.get("phone").is_none());
    }
}
