//! User Repository
//!
//! 사용자 테이블 연산을 담당합니다. 모든 조회는 역할 테이블과 조인하여
//! 역할이 채워진 [`User`]를 반환합니다.

use async_trait::async_trait;
use rolegate_core::{Role, StoreError, User, UserInsert, UserStore};
use sqlx::{FromRow, PgPool};

use super::store_error;

// ================================================================================================
// Types
// ================================================================================================

/// `users` ⨝ `roles` 조인 결과 행
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub nom: String,
    pub email: String,
    #[sqlx(default)]
    pub password: Option<String>,
    pub role_id: i64,
    pub role_name: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.nom,
            email: row.email,
            password_hash: row.password,
            role: Role::new(row.role_id, row.role_name),
        }
    }
}

const SELECT_USERS: &str = r#"
    SELECT u.id, u.nom, u.email, u.password, r.id AS role_id, r.name AS role_name
    FROM users u
    JOIN roles r ON r.id = u.role_id
"#;

// ================================================================================================
// Repository
// ================================================================================================

/// PostgreSQL 사용자 저장소
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserRepository {
    async fn exists_by_email(&self, email: &str) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(store_error)
    }

    async fn insert(&self, user: UserInsert) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            WITH inserted AS (
                INSERT INTO users (nom, email, password, role_id)
                VALUES ($1, $2, $3, $4)
                RETURNING id, nom, email, password, role_id
            )
            SELECT i.id, i.nom, i.email, i.password, r.id AS role_id, r.name AS role_name
            FROM inserted i
            JOIN roles r ON r.id = i.role_id
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role_id)
        .fetch_one(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.into())
    }

    async fn find_all(&self) -> Result<Vec<User>, StoreError> {
        let rows = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USERS} ORDER BY u.id"))
            .fetch_all(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USERS} WHERE u.id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(row.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USERS} WHERE u.email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(row.map(User::from))
    }

    async fn update_role(&self, user_id: i64, role_id: i64) -> Result<Option<User>, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            WITH updated AS (
                UPDATE users SET role_id = $2
                WHERE id = $1
                RETURNING id, nom, email, password, role_id
            )
            SELECT u.id, u.nom, u.email, u.password, r.id AS role_id, r.name AS role_name
            FROM updated u
            JOIN roles r ON r.id = u.role_id
            "#,
        )
        .bind(user_id)
        .bind(role_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(store_error)?;

        Ok(row.map(User::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(store_error)?;

        Ok(result.rows_affected() > 0)
    }
}
