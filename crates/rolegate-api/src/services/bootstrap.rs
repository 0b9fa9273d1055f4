//! 시작 시 초기 데이터 생성.
//!
//! 기본 역할과 (설정된 경우) 초기 관리자 계정을 생성합니다. 여러 번 실행해도 안전합니다.

use rolegate_core::{
    AccountError, AccountResult, BootstrapConfig, KnownRole, NewUser, RoleStore, StoreError,
    ROLE_ADMIN,
};
use tracing::{debug, info};

use super::UserService;

/// 기본 역할(`ROLE_ADMIN`, `ROLE_USER`) 생성.
///
/// 이미 존재하는 역할은 건너뜁니다. 생성된 역할 수를 반환합니다.
pub async fn seed_default_roles(roles: &dyn RoleStore) -> Result<usize, StoreError> {
    let mut created = 0;

    for role in KnownRole::ALL {
        let name = role.as_str();
        if roles.exists_by_name(name).await? {
            debug!(role = name, "Role already present");
            continue;
        }

        match roles.insert(name).await {
            Ok(role) => {
                info!(role = %role, id = role.id, "Role created");
                created += 1;
            }
            // 다른 인스턴스가 동시에 생성한 경우
            Err(StoreError::UniqueViolation(_)) => {
                debug!(role = name, "Role created concurrently");
            }
            Err(e) => return Err(e),
        }
    }

    Ok(created)
}

/// 설정된 초기 관리자 계정 생성.
///
/// 설정이 없거나 계정이 이미 존재하면 아무것도 하지 않습니다.
/// 계정을 새로 만들었으면 `true`.
pub async fn seed_admin_user(users: &UserService, config: &BootstrapConfig) -> AccountResult<bool> {
    let Some((name, email, password)) = config.admin_account() else {
        return Ok(false);
    };

    let profile = NewUser::new(name, email, Some(password.to_string()));
    match users.create_user(profile, Some(ROLE_ADMIN)).await {
        Ok(user) => {
            info!(user_id = user.id, "Bootstrap admin account created");
            Ok(true)
        }
        Err(AccountError::DuplicateEmail { .. }) => {
            debug!("Bootstrap admin account already exists");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::CredentialHasher;
    use crate::repository::MemoryStore;
    use rolegate_core::ROLE_USER;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_seed_roles_is_idempotent() {
        let store = MemoryStore::new();

        assert_eq!(seed_default_roles(&store).await.unwrap(), 2);
        assert_eq!(seed_default_roles(&store).await.unwrap(), 0);

        assert_eq!(store.find_by_name(ROLE_ADMIN).await.unwrap().unwrap().id, 1);
        assert_eq!(store.find_by_name(ROLE_USER).await.unwrap().unwrap().id, 2);
    }

    #[tokio::test]
    async fn test_seed_admin_user() {
        let store = MemoryStore::new();
        seed_default_roles(&store).await.unwrap();
        let hasher = CredentialHasher::with_params(1024, 1, 1).unwrap();
        let users = UserService::new(Arc::new(store.clone()), Arc::new(store), hasher);

        let none = BootstrapConfig::default();
        assert!(!seed_admin_user(&users, &none).await.unwrap());

        let config = BootstrapConfig {
            admin_email: Some("root@x.com".to_string()),
            admin_password: Some("root-pw".to_string()),
            admin_name: None,
        };
        assert!(seed_admin_user(&users, &config).await.unwrap());
        assert!(!seed_admin_user(&users, &config).await.unwrap());

        let admin = users.get_user_by_email("root@x.com").await.unwrap();
        assert_eq!(admin.role_name(), ROLE_ADMIN);
        assert_eq!(admin.name, "Administrator");
    }
}
