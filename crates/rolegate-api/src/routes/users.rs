//! 사용자 관리 및 프로필 endpoint.
//!
//! - `/api/admin/users` - 관리자 전용 사용자 관리
//! - `/api/users/profile` - 인증된 사용자 본인 프로필

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, put},
    Json, Router,
};
use rolegate_core::User;
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::auth::{AdminUser, AuthUser};
use crate::error::{account_error, ApiErrorResponse, ApiResult};
use crate::extract::JsonBody;
use crate::state::AppState;

/// 사용자 응답. 비밀번호 해시는 포함하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    /// 표시 이름
    pub nom: String,
    pub email: String,
    /// 역할 이름 (예: "ROLE_USER")
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nom: user.name,
            email: user.email,
            role: user.role.name,
        }
    }
}

/// 역할 변경 요청.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    #[serde(default)]
    pub role_name: String,
}

/// 사용자 삭제 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteUserResponse {
    pub deleted: bool,
}

/// 전체 사용자 목록 (관리자 전용).
#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "사용자 목록", body = Vec<UserResponse>),
        (status = 401, description = "인증 필요"),
        (status = 403, description = "권한 부족")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn list_users(
    AdminUser(_admin): AdminUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<UserResponse>>> {
    debug!("GET /api/admin/users");

    let users = state.users.list_users().await.map_err(account_error)?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// 단일 사용자 조회 (관리자 전용).
#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    params(("id" = i64, Path, description = "사용자 ID")),
    responses(
        (status = 200, description = "사용자", body = UserResponse),
        (status = 400, description = "사용자 없음", body = ApiErrorResponse),
        (status = 401, description = "인증 필요"),
        (status = 403, description = "권한 부족")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn get_user(
    AdminUser(_admin): AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<UserResponse>> {
    let user = state.users.get_user_by_id(id).await.map_err(account_error)?;
    Ok(Json(user.into()))
}

/// 사용자 역할 변경 (관리자 전용).
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/role",
    params(("id" = i64, Path, description = "사용자 ID")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "변경된 사용자", body = UserResponse),
        (status = 400, description = "사용자 또는 역할 없음", body = ApiErrorResponse),
        (status = 401, description = "인증 필요"),
        (status = 403, description = "권한 부족")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn update_user_role(
    AdminUser(admin): AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    JsonBody(request): JsonBody<UpdateRoleRequest>,
) -> ApiResult<Json<UserResponse>> {
    debug!(user_id = id, role = %request.role_name, by = %admin.email, "Updating user role");

    let user = state
        .users
        .update_user_role(id, &request.role_name)
        .await
        .map_err(account_error)?;
    Ok(Json(user.into()))
}

/// 사용자 삭제 (관리자 전용).
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(("id" = i64, Path, description = "사용자 ID")),
    responses(
        (status = 200, description = "삭제 결과", body = DeleteUserResponse),
        (status = 401, description = "인증 필요"),
        (status = 403, description = "권한 부족")
    ),
    security(("bearer_auth" = [])),
    tag = "admin"
)]
pub async fn delete_user(
    AdminUser(_admin): AdminUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DeleteUserResponse>> {
    let deleted = state.users.delete_user(id).await.map_err(account_error)?;
    Ok(Json(DeleteUserResponse { deleted }))
}

/// 본인 프로필 조회.
///
/// 경로 파라미터가 아니라 토큰 subject로 사용자를 찾습니다.
#[utoipa::path(
    get,
    path = "/api/users/profile",
    responses(
        (status = 200, description = "본인 프로필", body = UserResponse),
        (status = 400, description = "사용자 조회 실패", body = ApiErrorResponse),
        (status = 401, description = "인증 필요")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn get_profile(
    AuthUser(identity): AuthUser,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .users
        .get_user_by_email(&identity.email)
        .await
        .map_err(account_error)?;
    Ok(Json(user.into()))
}

/// 관리자 라우터 생성 (`/api/admin`에 마운트).
pub fn admin_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user).delete(delete_user))
        .route("/users/{id}/role", put(update_user_role))
}

/// 프로필 라우터 생성 (`/api/users`에 마운트).
pub fn profile_router() -> Router<Arc<AppState>> {
    Router::new().route("/profile", get(get_profile))
}
