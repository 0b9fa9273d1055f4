//! 사용자/역할 저장소 추상화.
//!
//! 관계형 저장소(PostgreSQL)와 인메모리 저장소가 동일한 인터페이스를
//! 구현하므로 서비스 계층은 저장소 종류와 무관하게 작성됩니다.

use async_trait::async_trait;
use thiserror::Error;

use super::{Role, User, UserInsert};

// =============================================================================
// 에러 타입
// =============================================================================

/// 저장소 에러.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// 고유 제약 조건 위반 (예: 이메일 중복)
    #[error("고유 제약 조건 위반: {0}")]
    UniqueViolation(String),

    /// 참조 무결성 위반 (예: 존재하지 않는 역할 참조)
    #[error("참조 무결성 위반: {0}")]
    ForeignKeyViolation(String),

    /// 연결 실패 등 백엔드 에러
    #[error("저장소 에러: {0}")]
    Backend(String),
}

// =============================================================================
// RoleStore Trait
// =============================================================================

/// 역할 저장소.
#[async_trait]
pub trait RoleStore: Send + Sync {
    /// 이름으로 역할 조회.
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, StoreError>;

    /// 이름의 역할이 존재하는지 확인.
    async fn exists_by_name(&self, name: &str) -> Result<bool, StoreError>;

    /// 새 역할 생성.
    ///
    /// # Errors
    ///
    /// - `StoreError::UniqueViolation`: 같은 이름의 역할이 이미 존재
    async fn insert(&self, name: &str) -> Result<Role, StoreError>;
}

// =============================================================================
// UserStore Trait
// =============================================================================

/// 사용자 저장소.
///
/// 반환되는 [`User`]는 항상 참조하는 역할이 채워진 상태입니다.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// 이메일 사용 여부 확인.
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError>;

    /// 사용자 저장.
    ///
    /// # Errors
    ///
    /// - `StoreError::UniqueViolation`: 이메일 중복
    /// - `StoreError::ForeignKeyViolation`: 존재하지 않는 역할 참조
    async fn insert(&self, user: UserInsert) -> Result<User, StoreError>;

    /// 전체 사용자 조회.
    async fn find_all(&self) -> Result<Vec<User>, StoreError>;

    /// ID로 사용자 조회.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    /// 이메일로 사용자 조회.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// 사용자 역할 변경. 사용자가 없으면 None.
    async fn update_role(&self, user_id: i64, role_id: i64) -> Result<Option<User>, StoreError>;

    /// 사용자 삭제. 삭제된 행이 있으면 true.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;
}
