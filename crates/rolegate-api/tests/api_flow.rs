//! 라우터 전체를 통한 회원가입 → 로그인 → 권한 검사 흐름 테스트.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::AUTHORIZATION, Request, StatusCode},
    response::Response,
    Router,
};
use rolegate_api::auth::{CredentialHasher, TokenIssuer};
use rolegate_api::routes::create_api_router;
use rolegate_api::state::AppState;
use rolegate_core::{BootstrapConfig, ROLE_ADMIN, ROLE_USER};
use serde_json::{json, Value};
use tower::ServiceExt;

const ADMIN_EMAIL: &str = "admin@x.com";
const ADMIN_PASSWORD: &str = "admin-pw";

async fn test_app() -> Router {
    let hasher = CredentialHasher::with_params(1024, 1, 1).unwrap();
    let tokens = TokenIssuer::new("integration-test-secret-0123456789abcdef", 60_000);
    let state = AppState::in_memory(hasher, tokens);

    let bootstrap = BootstrapConfig {
        admin_email: Some(ADMIN_EMAIL.to_string()),
        admin_password: Some(ADMIN_PASSWORD.to_string()),
        admin_name: Some("Admin".to_string()),
    };
    state.bootstrap(&bootstrap).await.unwrap();

    create_api_router().with_state(Arc::new(state))
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register(app: &Router, nom: &str, email: &str, password: &str) -> Response {
    send(
        app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({"nom": nom, "email": email, "password": password})),
        ),
    )
    .await
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let response = send(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": email, "password": password})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn register_login_and_read_profile() {
    let app = test_app().await;

    let response = register(&app, "A", "a@x.com", "p1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    // 관리자 계정이 1번
    assert_eq!(body["userId"], 2);

    let token = login(&app, "a@x.com", "p1").await;

    let response = send(&app, json_request("GET", "/api/users/profile", Some(token.as_str()), None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let profile = body_json(response).await;
    assert_eq!(
        profile,
        json!({"id": 2, "nom": "A", "email": "a@x.com", "role": ROLE_USER})
    );
    assert!(profile.get("password").is_none());
}

#[tokio::test]
async fn duplicate_registration_is_rejected() {
    let app = test_app().await;

    assert_eq!(register(&app, "A", "a@x.com", "p1").await.status(), StatusCode::OK);

    let response = register(&app, "B", "a@x.com", "p2").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "DUPLICATE_EMAIL");
    assert!(body["message"].is_string());

    // 원래 비밀번호로만 로그인 가능
    login(&app, "a@x.com", "p1").await;
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = test_app().await;
    register(&app, "A", "a@x.com", "p1").await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "a@x.com", "password": "p2"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_require_token() {
    let app = test_app().await;

    for uri in ["/api/users/profile", "/api/admin/users"] {
        let response = send(&app, json_request("GET", uri, None, None)).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }

    let response = send(
        &app,
        json_request("GET", "/api/users/profile", Some("garbage"), None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn admin_manages_roles_and_users_are_forbidden() {
    let app = test_app().await;
    register(&app, "A", "a@x.com", "p1").await;

    let user_token = login(&app, "a@x.com", "p1").await;
    let admin_token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    // 일반 사용자는 관리자 엔드포인트 접근 불가
    let response = send(&app, json_request("GET", "/api/admin/users", Some(user_token.as_str()), None)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(
        &app,
        json_request(
            "PUT",
            "/api/admin/users/2/role",
            Some(user_token.as_str()),
            Some(json!({"roleName": ROLE_ADMIN})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // 관리자는 목록 조회 가능
    let response = send(&app, json_request("GET", "/api/admin/users", Some(admin_token.as_str()), None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let users = body_json(response).await;
    assert_eq!(users.as_array().unwrap().len(), 2);

    // 역할 변경
    let response = send(
        &app,
        json_request(
            "PUT",
            "/api/admin/users/2/role",
            Some(admin_token.as_str()),
            Some(json!({"roleName": ROLE_ADMIN})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["role"], ROLE_ADMIN);

    // 기존 토큰으로 새 역할이 즉시 적용된다
    let response = send(&app, json_request("GET", "/api/admin/users", Some(user_token.as_str()), None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn role_update_failures_are_bad_requests() {
    let app = test_app().await;
    register(&app, "A", "a@x.com", "p1").await;
    let admin_token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let response = send(
        &app,
        json_request(
            "PUT",
            "/api/admin/users/99/role",
            Some(admin_token.as_str()),
            Some(json!({"roleName": ROLE_ADMIN})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "USER_NOT_FOUND");

    let response = send(
        &app,
        json_request(
            "PUT",
            "/api/admin/users/2/role",
            Some(admin_token.as_str()),
            Some(json!({"roleName": "ROLE_GHOST"})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "ROLE_NOT_FOUND");

    let response = send(
        &app,
        json_request(
            "PUT",
            "/api/admin/users/2/role",
            Some(admin_token.as_str()),
            Some(json!({"roleName": 7})),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "INVALID_REQUEST_BODY");

    let response = send(&app, json_request("GET", "/api/admin/users/2", Some(admin_token.as_str()), None)).await;
    assert_eq!(body_json(response).await["role"], ROLE_USER);
}

#[tokio::test]
async fn admin_deletes_user_and_token_stops_working() {
    let app = test_app().await;
    register(&app, "A", "a@x.com", "p1").await;
    let user_token = login(&app, "a@x.com", "p1").await;
    let admin_token = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let response = send(&app, json_request("DELETE", "/api/admin/users/2", Some(admin_token.as_str()), None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["deleted"], true);

    let response = send(&app, json_request("DELETE", "/api/admin/users/2", Some(admin_token.as_str()), None)).await;
    assert_eq!(body_json(response).await["deleted"], false);

    let response = send(&app, json_request("GET", "/api/users/profile", Some(user_token.as_str()), None)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = send(&app, json_request("GET", "/api/admin/users/2", Some(admin_token.as_str()), None)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_endpoints_are_public() {
    let app = test_app().await;

    let response = send(&app, json_request("GET", "/health", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, json_request("GET", "/health/ready", None, None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");
}
