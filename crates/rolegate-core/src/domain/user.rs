//! 사용자 모델.

use super::Role;

/// 저장된 사용자.
///
/// 비밀번호는 항상 해시로만 보관합니다. API 응답으로 직렬화할 때는
/// 해시를 제외한 표현으로 변환해야 합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// 저장소가 생성한 ID
    pub id: i64,
    /// 표시 이름
    pub name: String,
    /// 고유 이메일 (인증 식별자)
    pub email: String,
    /// PHC 형식 비밀번호 해시 (비밀번호 없이 생성된 경우 None)
    pub password_hash: Option<String>,
    /// 사용자 역할
    pub role: Role,
}

impl User {
    /// 역할 이름 반환.
    pub fn role_name(&self) -> &str {
        &self.role.name
    }
}

/// 사용자 생성 입력 (평문 비밀번호 포함).
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
}

impl NewUser {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password,
        }
    }
}

/// 저장소에 기록할 사용자 행.
///
/// 비밀번호는 이미 해시된 상태이고 역할은 ID로 참조합니다.
#[derive(Debug, Clone)]
pub struct UserInsert {
    pub name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role_id: i64,
}
