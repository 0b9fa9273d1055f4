//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//!
//! 새로운 엔드포인트를 추가할 때:
//!
//! 1. 응답/요청 타입에 `#[derive(ToSchema)]` 추가
//! 2. 핸들러에 `#[utoipa::path(...)]` 어노테이션 추가
//! 3. 이 파일의 `components(schemas(...))` 및 `paths(...)` 섹션에 추가

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ApiErrorResponse;
use crate::routes::{
    ComponentHealth, ComponentStatus, DeleteUserResponse, HealthResponse, LoginRequest,
    LoginResponse, RegisterRequest, RegisterResponse, UpdateRoleRequest, UserResponse,
};

/// Bearer JWT 보안 스킴 등록.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Rolegate API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Rolegate API",
        description = r#"
# Rolegate 사용자 인증 및 역할 관리 API

## 인증

로그인으로 발급받은 토큰을 `Authorization: Bearer <token>` 헤더에 포함하세요.
`/api/admin` 아래 엔드포인트는 `ROLE_ADMIN` 역할이 필요합니다.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
        (name = "auth", description = "인증 - 로그인 및 회원가입"),
        (name = "admin", description = "관리자 - 사용자 목록, 역할 변경, 삭제"),
        (name = "users", description = "사용자 - 본인 프로필")
    ),
    modifiers(&SecurityAddon),
    components(
        schemas(
            // ===== Health =====
            HealthResponse,
            ComponentHealth,
            ComponentStatus,

            // ===== Common =====
            ApiErrorResponse,

            // ===== Auth =====
            LoginRequest,
            LoginResponse,
            RegisterRequest,
            RegisterResponse,

            // ===== Users =====
            UserResponse,
            UpdateRoleRequest,
            DeleteUserResponse,
        )
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::health::health_ready,

        crate::routes::auth::login,
        crate::routes::auth::register,

        crate::routes::users::list_users,
        crate::routes::users::get_user,
        crate::routes::users::update_user_role,
        crate::routes::users::delete_user,
        crate::routes::users::get_profile,
    )
)]
pub struct ApiDoc;

/// Swagger UI 라우터 생성.
///
/// - `/swagger-ui` - Swagger UI 대화형 문서
/// - `/api-docs/openapi.json` - OpenAPI JSON 스펙
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_valid() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&spec).unwrap();

        assert!(json.contains("Rolegate API"));

        assert!(json.contains("/health/ready"));
        assert!(json.contains("/api/auth/login"));
        assert!(json.contains("/api/auth/register"));
        assert!(json.contains("/api/admin/users/{id}/role"));
        assert!(json.contains("/api/users/profile"));
    }

    #[test]
    fn test_openapi_has_bearer_scheme() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string(&spec).unwrap();

        assert!(json.contains("bearer_auth"));
        assert!(json.contains("UserResponse"));
        assert!(json.contains("ApiErrorResponse"));
    }

    #[test]
    fn test_swagger_ui_router_creates() {
        let _router: Router<()> = swagger_ui_router();
    }
}
