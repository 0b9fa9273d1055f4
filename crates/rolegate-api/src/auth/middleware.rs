//! Axum용 인증 추출기.
//!
//! Bearer 토큰을 검증하고 현재 저장된 역할로 인증 주체를 구성합니다.
//! 역할 검사는 핸들러 실행 전에 끝납니다.

use std::sync::Arc;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use rolegate_core::{AccountError, AuthenticatedIdentity, KnownRole};
use serde_json::json;
use tracing::error;

use crate::state::AppState;

/// 인증된 사용자 추출기.
///
/// ```rust,ignore
/// async fn profile(AuthUser(identity): AuthUser) -> impl IntoResponse {
///     identity.email
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser(pub AuthenticatedIdentity);

/// `ROLE_ADMIN` 권한을 요구하는 추출기.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedIdentity);

/// 인증 거부 사유.
#[derive(Debug, thiserror::Error)]
pub enum AuthRejection {
    #[error("인증 토큰이 필요합니다")]
    MissingToken,
    #[error("잘못된 Authorization 헤더 형식")]
    InvalidAuthHeader,
    #[error("유효하지 않은 토큰")]
    InvalidToken,
    #[error("권한이 부족합니다")]
    InsufficientPermission,
    #[error("인증 처리 중 오류가 발생했습니다")]
    Internal,
}

impl AuthRejection {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthRejection::MissingToken
            | AuthRejection::InvalidAuthHeader
            | AuthRejection::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthRejection::InsufficientPermission => StatusCode::FORBIDDEN,
            AuthRejection::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AuthRejection::MissingToken => "MISSING_TOKEN",
            AuthRejection::InvalidAuthHeader => "INVALID_AUTH_HEADER",
            AuthRejection::InvalidToken => "INVALID_TOKEN",
            AuthRejection::InsufficientPermission => "INSUFFICIENT_PERMISSION",
            AuthRejection::Internal => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "code": self.code(),
            "message": self.to_string(),
        }));

        (self.status(), body).into_response()
    }
}

/// `Authorization: Bearer <token>` 헤더에서 토큰 추출.
fn bearer_token(parts: &Parts) -> Result<&str, AuthRejection> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or(AuthRejection::MissingToken)?
        .to_str()
        .map_err(|_| AuthRejection::InvalidAuthHeader)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(AuthRejection::InvalidAuthHeader)?
        .trim();

    if token.is_empty() {
        return Err(AuthRejection::MissingToken);
    }
    Ok(token)
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;

        match state.auth.authenticate(token).await {
            Ok(identity) => Ok(AuthUser(identity)),
            Err(AccountError::TokenInvalid) => Err(AuthRejection::InvalidToken),
            Err(e) => {
                error!(error = %e, "Failed to resolve token subject");
                Err(AuthRejection::Internal)
            }
        }
    }
}

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(identity) = AuthUser::from_request_parts(parts, state).await?;
        require_role(KnownRole::Admin, &identity)?;
        Ok(AdminUser(identity))
    }
}

/// 인증 주체가 주어진 역할을 가지는지 확인.
///
/// 역할 사이에 상하 관계는 없습니다. 정확히 일치해야 통과합니다.
pub fn require_role(
    required: KnownRole,
    identity: &AuthenticatedIdentity,
) -> Result<(), AuthRejection> {
    if identity.has_role(required) {
        Ok(())
    } else {
        Err(AuthRejection::InsufficientPermission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use rolegate_core::{Role, ROLE_ADMIN, ROLE_USER};

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/users/profile");
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_require_role() {
        let admin = AuthenticatedIdentity::new("a@x.com", Role::new(1, ROLE_ADMIN));
        let user = AuthenticatedIdentity::new("u@x.com", Role::new(2, ROLE_USER));

        assert!(require_role(KnownRole::Admin, &admin).is_ok());
        assert!(require_role(KnownRole::User, &user).is_ok());
        assert!(matches!(
            require_role(KnownRole::Admin, &user),
            Err(AuthRejection::InsufficientPermission)
        ));
        assert!(require_role(KnownRole::User, &admin).is_err());
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert!(matches!(
            bearer_token(&parts_with(None)),
            Err(AuthRejection::MissingToken)
        ));
        assert!(matches!(
            bearer_token(&parts_with(Some("Basic abc"))),
            Err(AuthRejection::InvalidAuthHeader)
        ));
        assert!(matches!(
            bearer_token(&parts_with(Some("Bearer   "))),
            Err(AuthRejection::MissingToken)
        ));
        assert_eq!(bearer_token(&parts_with(Some("Bearer abc.def"))).unwrap(), "abc.def");
    }

    #[test]
    fn test_rejection_status_codes() {
        let cases = [
            (AuthRejection::MissingToken, StatusCode::UNAUTHORIZED),
            (AuthRejection::InvalidAuthHeader, StatusCode::UNAUTHORIZED),
            (AuthRejection::InvalidToken, StatusCode::UNAUTHORIZED),
            (AuthRejection::InsufficientPermission, StatusCode::FORBIDDEN),
            (AuthRejection::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (rejection, expected) in cases {
            assert_eq!(rejection.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_extractors_against_state() {
        let state = Arc::new(crate::state::create_test_state().await);
        state
            .users
            .create_user(
                rolegate_core::NewUser::new("U", "u@x.com", Some("pw".to_string())),
                None,
            )
            .await
            .unwrap();
        let token = state.auth.login("u@x.com", "pw").await.unwrap();
        let header = format!("Bearer {}", token);

        let mut parts = parts_with(Some(header.as_str()));
        let AuthUser(identity) = AuthUser::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(identity.email, "u@x.com");

        let mut parts = parts_with(Some(header.as_str()));
        let rejected = AdminUser::from_request_parts(&mut parts, &state).await;
        assert!(matches!(rejected, Err(AuthRejection::InsufficientPermission)));

        let mut parts = parts_with(Some("Bearer not-a-token"));
        let rejected = AuthUser::from_request_parts(&mut parts, &state).await;
        assert!(matches!(rejected, Err(AuthRejection::InvalidToken)));
    }
}
