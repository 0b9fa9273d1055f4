//! 로그인 및 회원가입 endpoint.
//!
//! 인증 없이 접근 가능한 공개 엔드포인트입니다.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use rolegate_core::{NewUser, ROLE_USER};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{account_error, validation_error, ApiErrorResponse, ApiResult};
use crate::extract::JsonBody;
use crate::state::AppState;

/// 로그인 요청.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// 로그인 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// 서명된 JWT
    pub token: String,
}

/// 회원가입 요청.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// 표시 이름
    #[serde(alias = "name")]
    #[validate(length(min = 1, message = "이름은 비어 있을 수 없습니다"))]
    pub nom: String,
    #[validate(email(message = "이메일 형식이 올바르지 않습니다"))]
    pub email: String,
    #[validate(length(min = 1, message = "비밀번호는 비어 있을 수 없습니다"))]
    pub password: String,
}

/// 회원가입 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
}

/// 로그인.
///
/// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "로그인 성공", body = LoginResponse),
        (status = 401, description = "이메일 또는 비밀번호 불일치", body = ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    debug!("POST /api/auth/login");

    let token = state
        .auth
        .login(&request.email, &request.password)
        .await
        .map_err(account_error)?;

    Ok(Json(LoginResponse { token }))
}

/// 회원가입.
///
/// 새 계정은 항상 `ROLE_USER`로 생성됩니다.
///
/// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "가입 성공", body = RegisterResponse),
        (status = 400, description = "이메일 중복 또는 잘못된 입력", body = ApiErrorResponse)
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<Arc<AppState>>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    debug!("POST /api/auth/register");
    request.validate().map_err(validation_error)?;

    let profile = NewUser::new(request.nom, request.email, Some(request.password));
    let user = state
        .users
        .create_user(profile, Some(ROLE_USER))
        .await
        .map_err(account_error)?;

    Ok(Json(RegisterResponse {
        message: "사용자가 등록되었습니다".to_string(),
        user_id: user.id,
    }))
}

/// 인증 라우터 생성.
pub fn auth_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
}
