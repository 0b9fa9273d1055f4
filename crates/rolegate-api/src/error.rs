//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.

use axum::{extract::rejection::JsonRejection, http::StatusCode, Json};
use rolegate_core::AccountError;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// 통합 API 에러 응답.
///
/// ```json
/// {
///   "code": "DUPLICATE_EMAIL",
///   "message": "이미 사용 중인 이메일입니다",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "USER_NOT_FOUND", "VALIDATION_ERROR")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    pub message: String,
    /// 에러 발생 타임스탬프 (Unix timestamp, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 타임스탬프를 포함한 에러 생성.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }

}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// 핸들러 에러 타입.
pub type ApiError = (StatusCode, Json<ApiErrorResponse>);

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, ApiError>;

/// 계정 에러를 HTTP 응답으로 변환.
///
/// 입력으로 인한 실패는 400, 인증 실패는 401, 나머지는 로그를 남기고 500.
pub fn account_error(err: AccountError) -> ApiError {
    let (status, code) = match &err {
        AccountError::DuplicateEmail { .. } => (StatusCode::BAD_REQUEST, "DUPLICATE_EMAIL"),
        AccountError::UserNotFound(_) => (StatusCode::BAD_REQUEST, "USER_NOT_FOUND"),
        AccountError::RoleNotFound(_) => (StatusCode::BAD_REQUEST, "ROLE_NOT_FOUND"),
        AccountError::AuthenticationFailed => (StatusCode::UNAUTHORIZED, "AUTHENTICATION_FAILED"),
        AccountError::TokenInvalid => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
        AccountError::TokenIssue(_) | AccountError::Hashing(_) | AccountError::Store(_) => {
            error!(error = %err, "Request failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiErrorResponse::new(
                    "INTERNAL_ERROR",
                    "요청을 처리하는 중 오류가 발생했습니다",
                )),
            );
        }
    };

    (status, Json(ApiErrorResponse::new(code, err.to_string())))
}

/// 입력 검증 실패를 400 응답으로 변환.
pub fn validation_error(errors: ValidationErrors) -> ApiError {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();

    (
        StatusCode::BAD_REQUEST,
        Json(ApiErrorResponse::new(
            "VALIDATION_ERROR",
            format!("입력값이 올바르지 않습니다: {}", fields.join(", ")),
        )),
    )
}

/// JSON 본문 추출 실패를 400 응답으로 변환.
///
/// 누락된 필드, 타입 불일치, 잘못된 Content-Type 모두 같은 코드로 응답합니다.
pub fn json_rejection(rejection: JsonRejection) -> ApiError {
    let message = match &rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Content-Type: application/json 헤더가 필요합니다".to_string()
        }
        _ => format!("요청 본문이 올바르지 않습니다: {}", rejection.body_text()),
    };

    (
        StatusCode::BAD_REQUEST,
        Json(ApiErrorResponse::new("INVALID_REQUEST_BODY", message)),
    )
}
