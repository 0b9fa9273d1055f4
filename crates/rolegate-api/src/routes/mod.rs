//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/api/auth` - 로그인, 회원가입 (공개)
//! - `/api/admin` - 사용자 관리 (`ROLE_ADMIN`)
//! - `/api/users` - 본인 프로필 (인증 필요)

pub mod auth;
pub mod health;
pub mod users;

pub use auth::{auth_router, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
pub use health::{health_router, ComponentHealth, ComponentStatus, HealthResponse};
pub use users::{
    admin_router, profile_router, DeleteUserResponse, UpdateRoleRequest, UserResponse,
};

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/health", health_router())
        .nest("/api/auth", auth_router())
        .nest("/api/admin", admin_router())
        .nest("/api/users", profile_router())
}
