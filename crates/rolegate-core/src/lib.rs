//! # Rolegate Core
//!
//! 사용자 인증 및 역할 관리 백엔드의 핵심 도메인 모델과 타입을 제공합니다.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 사용자(User) 및 역할(Role) 도메인 타입
//! - 요청 범위의 인증 주체 ([`AuthenticatedIdentity`])
//! - 저장소 추상화 ([`UserStore`], [`RoleStore`])
//! - 도메인 에러 타입
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
