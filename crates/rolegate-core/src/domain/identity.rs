//! 요청 범위 인증 주체.

use super::{KnownRole, Role};

/// 검증된 토큰에서 도출된 인증 주체.
///
/// 토큰의 subject(이메일)와 현재 저장된 사용자 역할로 구성됩니다.
/// 요청 하나의 수명 동안만 존재하며 저장되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedIdentity {
    /// 토큰 subject - 사용자 이메일
    pub email: String,
    /// 사용자 역할
    pub role: Role,
}

impl AuthenticatedIdentity {
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        Self {
            email: email.into(),
            role,
        }
    }

    /// 주어진 역할을 가지는지 확인.
    pub fn has_role(&self, role: KnownRole) -> bool {
        self.role.is(role)
    }

    /// 관리자인지 확인.
    pub fn is_admin(&self) -> bool {
        self.has_role(KnownRole::Admin)
    }
}
