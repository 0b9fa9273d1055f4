//! 사용자 관리 서비스.
//!
//! 사용자 생성(비밀번호 해싱, 기본 역할 할당), 조회, 역할 변경, 삭제를 담당합니다.
//! 모든 쓰기는 저장소에 즉시 반영됩니다.

use std::sync::Arc;

use rolegate_core::{
    AccountError, AccountResult, NewUser, Role, RoleStore, StoreError, User, UserInsert,
    UserLookup, UserStore, ROLE_USER,
};
use tracing::{debug, info};

use crate::auth::CredentialHasher;
use crate::metrics::record_user_registered;

/// 사용자 관리 서비스.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserStore>,
    roles: Arc<dyn RoleStore>,
    hasher: CredentialHasher,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserStore>,
        roles: Arc<dyn RoleStore>,
        hasher: CredentialHasher,
    ) -> Self {
        Self {
            users,
            roles,
            hasher,
        }
    }

    /// 사용자 생성.
    ///
    /// 역할 이름이 비어 있거나 없으면 `ROLE_USER`를 사용합니다.
    /// 평문 비밀번호는 저장 전에 해시로 대체됩니다.
    ///
    /// # Errors
    ///
    /// - 이메일이 이미 존재하면 [`AccountError::DuplicateEmail`]
    /// - 역할이 존재하지 않으면 [`AccountError::RoleNotFound`]
    pub async fn create_user(
        &self,
        profile: NewUser,
        role_name: Option<&str>,
    ) -> AccountResult<User> {
        if self.users.exists_by_email(&profile.email).await? {
            return Err(AccountError::DuplicateEmail {
                email: profile.email,
            });
        }

        let role_name = role_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(ROLE_USER);
        let role = self.require_role(role_name).await?;

        let password_hash = match profile.password.as_deref() {
            Some(raw) => Some(
                self.hasher
                    .hash(raw)
                    .map_err(|e| AccountError::Hashing(e.to_string()))?,
            ),
            None => None,
        };

        let insert = UserInsert {
            name: profile.name,
            email: profile.email,
            password_hash,
            role_id: role.id,
        };
        let email = insert.email.clone();

        // 사전 검사와 insert 사이의 동시 등록은 고유 제약 조건이 막는다
        let user = self.users.insert(insert).await.map_err(|e| match e {
            StoreError::UniqueViolation(_) => AccountError::DuplicateEmail { email },
            other => AccountError::Store(other),
        })?;

        info!(user_id = user.id, role = %user.role, "User created");
        record_user_registered(user.role_name());
        Ok(user)
    }

    /// 전체 사용자 목록.
    pub async fn list_users(&self) -> AccountResult<Vec<User>> {
        Ok(self.users.find_all().await?)
    }

    /// ID로 사용자 조회.
    pub async fn get_user_by_id(&self, id: i64) -> AccountResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(AccountError::UserNotFound(UserLookup::Id(id)))
    }

    /// 이메일로 사용자 조회.
    pub async fn get_user_by_email(&self, email: &str) -> AccountResult<User> {
        self.users
            .find_by_email(email)
            .await?
            .ok_or_else(|| AccountError::UserNotFound(UserLookup::Email(email.to_string())))
    }

    /// 사용자 역할 변경.
    ///
    /// 생성과 달리 기본 역할로 대체하지 않습니다. 사용자나 역할이 없으면
    /// 아무것도 기록하지 않고 에러를 반환합니다.
    pub async fn update_user_role(&self, user_id: i64, role_name: &str) -> AccountResult<User> {
        let user = self.get_user_by_id(user_id).await?;
        let role = self.require_role(role_name).await?;

        if user.role == role {
            debug!(user_id, role = %role, "Role unchanged");
            return Ok(user);
        }

        let updated = self
            .users
            .update_role(user_id, role.id)
            .await?
            .ok_or(AccountError::UserNotFound(UserLookup::Id(user_id)))?;

        info!(user_id, from = %user.role, to = %updated.role, "User role updated");
        Ok(updated)
    }

    /// 사용자 삭제. 실제로 삭제된 행이 있으면 `true`.
    pub async fn delete_user(&self, id: i64) -> AccountResult<bool> {
        let deleted = self.users.delete(id).await?;
        if deleted {
            info!(user_id = id, "User deleted");
        }
        Ok(deleted)
    }

    async fn require_role(&self, name: &str) -> AccountResult<Role> {
        self.roles
            .find_by_name(name)
            .await?
            .ok_or_else(|| AccountError::RoleNotFound(name.to_string()))
    }
}
