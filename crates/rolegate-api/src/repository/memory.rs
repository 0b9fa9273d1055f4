//! 인메모리 저장소.
//!
//! 데이터베이스 없이 서버를 실행하거나 테스트할 때 사용합니다.
//! 관계형 저장소와 같은 규칙(이메일 고유성, 역할 참조 무결성, 역할 이름 고유성)을 지킵니다.

use async_trait::async_trait;
use rolegate_core::{Role, RoleStore, StoreError, User, UserInsert, UserStore};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Clone)]
struct UserRecord {
    name: String,
    email: String,
    password_hash: Option<String>,
    role_id: i64,
}

#[derive(Debug, Default)]
struct Tables {
    roles: BTreeMap<i64, Role>,
    users: BTreeMap<i64, UserRecord>,
    last_role_id: i64,
    last_user_id: i64,
}

impl Tables {
    fn role(&self, id: i64) -> Result<&Role, StoreError> {
        self.roles
            .get(&id)
            .ok_or_else(|| StoreError::ForeignKeyViolation(format!("role_id {} does not exist", id)))
    }

    fn materialize(&self, id: i64, record: &UserRecord) -> Result<User, StoreError> {
        Ok(User {
            id,
            name: record.name.clone(),
            email: record.email.clone(),
            password_hash: record.password_hash.clone(),
            role: self.role(record.role_id)?.clone(),
        })
    }
}

/// 인메모리 사용자/역할 저장소.
///
/// 복제본은 같은 테이블을 공유합니다.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleStore for MemoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.roles.values().find(|r| r.name == name).cloned())
    }

    async fn exists_by_name(&self, name: &str) -> Result<bool, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.roles.values().any(|r| r.name == name))
    }

    async fn insert(&self, name: &str) -> Result<Role, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.roles.values().any(|r| r.name == name) {
            return Err(StoreError::UniqueViolation(format!(
                "roles.name '{}' already exists",
                name
            )));
        }

        tables.last_role_id += 1;
        let role = Role::new(tables.last_role_id, name);
        tables.roles.insert(role.id, role.clone());
        Ok(role)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().any(|u| u.email == email))
    }

    async fn insert(&self, user: UserInsert) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::UniqueViolation(
                "users.email already exists".to_string(),
            ));
        }
        tables.role(user.role_id)?;

        tables.last_user_id += 1;
        let id = tables.last_user_id;
        let record = UserRecord {
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            role_id: user.role_id,
        };
        let created = tables.materialize(id, &record)?;
        tables.users.insert(id, record);
        Ok(created)
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let tables = self.tables.read().await;
        tables
            .users
            .iter()
            .map(|(id, record)| tables.materialize(*id, record))
            .collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        tables
            .users
            .get(&id)
            .map(|record| tables.materialize(id, record))
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.read().await;
        tables
            .users
            .iter()
            .find(|(_, record)| record.email == email)
            .map(|(id, record)| tables.materialize(*id, record))
            .transpose()
    }

    async fn update_role(&self, user_id: i64, role_id: i64) -> Result<Option<User>, StoreError> {
        let mut tables = self.tables.write().await;
        tables.role(role_id)?;

        let Some(record) = tables.users.get_mut(&user_id) else {
            return Ok(None);
        };
        record.role_id = role_id;
        let record = record.clone();

        tables.materialize(user_id, &record).map(Some)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn insert_for(email: &str, role_id: i64) -> UserInsert {
        UserInsert {
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: Some("hash".to_string()),
            role_id,
        }
    }

    #[tokio::test]
    async fn test_role_names_are_unique() {
        let store = MemoryStore::new();
        let role = RoleStore::insert(&store, "ROLE_USER").await.unwrap();
        assert_eq!(role.id, 1);

        let dup = RoleStore::insert(&store, "ROLE_USER").await;
        assert!(matches!(dup, Err(StoreError::UniqueViolation(_))));
        assert!(store.exists_by_name("ROLE_USER").await.unwrap());
        assert!(!store.exists_by_name("ROLE_ADMIN").await.unwrap());
    }

    #[tokio::test]
    async fn test_user_insert_enforces_constraints() {
        let store = MemoryStore::new();
        let role = RoleStore::insert(&store, "ROLE_USER").await.unwrap();

        let user = UserStore::insert(&store, insert_for("a@x.com", role.id))
            .await
            .unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.role, role);

        let dup = UserStore::insert(&store, insert_for("a@x.com", role.id)).await;
        assert!(matches!(dup, Err(StoreError::UniqueViolation(_))));

        let bad_role = UserStore::insert(&store, insert_for("b@x.com", 99)).await;
        assert!(matches!(bad_role, Err(StoreError::ForeignKeyViolation(_))));

        assert_eq!(store.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_role_and_delete() {
        let store = MemoryStore::new();
        let admin = RoleStore::insert(&store, "ROLE_ADMIN").await.unwrap();
        let user_role = RoleStore::insert(&store, "ROLE_USER").await.unwrap();
        let user = UserStore::insert(&store, insert_for("a@x.com", user_role.id))
            .await
            .unwrap();

        let updated = store.update_role(user.id, admin.id).await.unwrap().unwrap();
        assert_eq!(updated.role, admin);

        assert!(store.update_role(42, admin.id).await.unwrap().is_none());

        assert!(store.delete(user.id).await.unwrap());
        assert!(!store.delete(user.id).await.unwrap());
        assert!(store.find_by_email("a@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_tables() {
        let store = MemoryStore::new();
        let clone = store.clone();
        RoleStore::insert(&clone, "ROLE_USER").await.unwrap();
        assert!(store.exists_by_name("ROLE_USER").await.unwrap());
    }
}
