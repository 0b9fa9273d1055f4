//! 계정 관리 에러 타입.
//!
//! 사용자 서비스와 인증 흐름에서 사용되는 에러 타입을 정의합니다.

use thiserror::Error;

use crate::domain::StoreError;

/// 사용자 조회 키.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    Id(i64),
    Email(String),
}

impl std::fmt::Display for UserLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserLookup::Id(id) => write!(f, "ID {}", id),
            UserLookup::Email(email) => write!(f, "이메일 {}", email),
        }
    }
}

/// 계정 관리 에러.
#[derive(Debug, Error)]
pub enum AccountError {
    /// 이미 등록된 이메일
    #[error("이미 사용 중인 이메일입니다")]
    DuplicateEmail { email: String },

    /// 사용자 없음
    #[error("사용자를 찾을 수 없습니다: {0}")]
    UserNotFound(UserLookup),

    /// 역할 없음
    #[error("역할을 찾을 수 없습니다: {0}")]
    RoleNotFound(String),

    /// 자격 증명 불일치 (알 수 없는 이메일과 잘못된 비밀번호를 구분하지 않음)
    #[error("이메일 또는 비밀번호가 올바르지 않습니다")]
    AuthenticationFailed,

    /// 토큰 검증 실패 또는 토큰 주체를 찾을 수 없음
    #[error("유효하지 않은 토큰")]
    TokenInvalid,

    /// 토큰 발급 실패
    #[error("토큰 발급 실패: {0}")]
    TokenIssue(String),

    /// 비밀번호 해싱 실패
    #[error("비밀번호 처리 실패: {0}")]
    Hashing(String),

    /// 저장소 에러
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// 계정 작업을 위한 Result 타입.
pub type AccountResult<T> = Result<T, AccountError>;
