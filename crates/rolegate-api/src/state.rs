//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 시작 시 한 번 구성되며 `Arc`로 래핑되어 요청 간에 공유됩니다.

use std::sync::Arc;

use rolegate_core::{BootstrapConfig, RoleStore, UserStore};
use tracing::info;

use crate::auth::{CredentialHasher, TokenIssuer};
use crate::repository::{MemoryStore, PgRoleRepository, PgUserRepository};
use crate::services::{seed_admin_user, seed_default_roles, AuthService, UserService};

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 사용자 관리 서비스
    pub users: UserService,

    /// 로그인/토큰 인증 서비스
    pub auth: AuthService,

    /// 역할 저장소 (시작 시 기본 역할 생성용)
    pub role_store: Arc<dyn RoleStore>,

    /// 데이터베이스 연결 풀 (인메모리 저장소 사용 시 None)
    pub db_pool: Option<sqlx::PgPool>,

    /// 서버 시작 시간 (업타임 계산용)
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 저장소와 인증 구성 요소로 상태 생성.
    pub fn new(
        user_store: Arc<dyn UserStore>,
        role_store: Arc<dyn RoleStore>,
        hasher: CredentialHasher,
        tokens: TokenIssuer,
    ) -> Self {
        let tokens = Arc::new(tokens);
        Self {
            users: UserService::new(user_store.clone(), role_store.clone(), hasher.clone()),
            auth: AuthService::new(user_store, hasher, tokens),
            role_store,
            db_pool: None,
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// PostgreSQL 저장소를 사용하는 상태.
    pub fn postgres(pool: sqlx::PgPool, hasher: CredentialHasher, tokens: TokenIssuer) -> Self {
        Self::new(
            Arc::new(PgUserRepository::new(pool.clone())),
            Arc::new(PgRoleRepository::new(pool.clone())),
            hasher,
            tokens,
        )
        .with_db_pool(pool)
    }

    /// 인메모리 저장소를 사용하는 상태.
    pub fn in_memory(hasher: CredentialHasher, tokens: TokenIssuer) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store, hasher, tokens)
    }

    /// 데이터베이스 연결 설정.
    pub fn with_db_pool(mut self, pool: sqlx::PgPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// 기본 역할과 설정된 관리자 계정 생성.
    ///
    /// 저장소 실패는 그대로 반환되며 시작을 중단해야 합니다.
    pub async fn bootstrap(&self, config: &BootstrapConfig) -> anyhow::Result<()> {
        let created = seed_default_roles(self.role_store.as_ref()).await?;
        info!(created, "Default roles ensured");

        seed_admin_user(&self.users, config).await?;
        Ok(())
    }

    /// 데이터베이스 연결 상태 확인.
    pub async fn is_db_healthy(&self) -> bool {
        if let Some(pool) = &self.db_pool {
            sqlx::query("SELECT 1").execute(pool).await.is_ok()
        } else {
            false
        }
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        (chrono::Utc::now() - self.started_at).num_seconds()
    }
}

/// 테스트용 상태 생성.
///
/// 인메모리 저장소, 저비용 해시 파라미터, 기본 역할이 준비된 상태를 반환합니다.
#[cfg(any(test, feature = "test-utils"))]
pub async fn create_test_state() -> AppState {
    let hasher = CredentialHasher::with_params(1024, 1, 1).expect("valid test hash params");
    let tokens = TokenIssuer::new("test-secret-key-with-enough-length-123", 60_000);
    let state = AppState::in_memory(hasher, tokens);
    state
        .bootstrap(&BootstrapConfig::default())
        .await
        .expect("bootstrap in-memory state");
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use rolegate_core::{ROLE_ADMIN, ROLE_USER};

    #[tokio::test]
    async fn test_state_bootstrap_seeds_roles() {
        let state = create_test_state().await;

        assert!(state.role_store.exists_by_name(ROLE_ADMIN).await.unwrap());
        assert!(state.role_store.exists_by_name(ROLE_USER).await.unwrap());
        assert!(state.db_pool.is_none());
        assert!(!state.is_db_healthy().await);
        assert!(!state.version.is_empty());
    }

    #[tokio::test]
    async fn test_bootstrap_is_repeatable() {
        let state = create_test_state().await;
        state.bootstrap(&BootstrapConfig::default()).await.unwrap();
        assert!(state.users.list_users().await.unwrap().is_empty());
    }
}
