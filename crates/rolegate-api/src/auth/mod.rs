//! 인증 및 권한 부여.
//!
//! JWT 기반 인증 및 역할 기반 접근 제어를 제공합니다.
//!
//! # 구성 요소
//!
//! - [`TokenIssuer`]: 토큰 발급 및 검증
//! - [`CredentialHasher`]: Argon2 비밀번호 해싱
//! - [`AuthUser`] / [`AdminUser`]: Axum 핸들러용 인증 추출기
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! async fn admin_only(AdminUser(identity): AdminUser) -> impl IntoResponse {
//!     format!("Hello, {}!", identity.email)
//! }
//! ```

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, TokenError, TokenErrorKind, TokenIssuer};
pub use middleware::{require_role, AdminUser, AuthRejection, AuthUser};
pub use password::{CredentialHasher, PasswordError};
