//! Repository pattern for database operations.
//!
//! 저장소 접근 로직을 서비스 계층에서 분리하여 관리합니다.
//! PostgreSQL 구현과 인메모리 구현이 같은 `UserStore`/`RoleStore` trait을 구현합니다.

pub mod memory;
pub mod roles;
pub mod users;

pub use memory::MemoryStore;
pub use roles::{PgRoleRepository, RoleRow};
pub use users::{PgUserRepository, UserRow};

use rolegate_core::StoreError;

/// 마이그레이션 실행.
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// sqlx 에러를 저장소 에러로 변환.
///
/// 제약 조건 위반은 별도 변형으로 분류하여 서비스 계층이 도메인 에러로 바꿀 수 있게 합니다.
pub(crate) fn store_error(err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.is_unique_violation() {
            return StoreError::UniqueViolation(db_err.message().to_string());
        }
        if db_err.is_foreign_key_violation() {
            return StoreError::ForeignKeyViolation(db_err.message().to_string());
        }
    }
    StoreError::Backend(err.to_string())
}
