//! 역할 정의.
//!
//! 역할은 저장소에 이름으로 저장되는 권한 그룹입니다.
//! 시스템이 직접 다루는 역할은 [`KnownRole`]로 표현합니다.

use serde::{Deserialize, Serialize};

/// 관리자 역할 이름.
pub const ROLE_ADMIN: &str = "ROLE_ADMIN";

/// 일반 사용자 역할 이름.
pub const ROLE_USER: &str = "ROLE_USER";

/// 저장된 역할.
///
/// 부트스트랩 시 한 번 생성되며 이후 변경/삭제되지 않습니다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Role {
    /// 저장소가 생성한 ID
    pub id: i64,
    /// 고유 역할 이름 (예: "ROLE_USER")
    pub name: String,
}

impl Role {
    /// 새 Role 생성.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// 이 역할이 주어진 알려진 역할인지 확인.
    pub fn is(&self, known: KnownRole) -> bool {
        self.name == known.as_str()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// 시스템이 기본으로 제공하는 역할.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownRole {
    /// 관리자 - 사용자 목록 조회 및 역할 변경
    Admin,
    /// 일반 사용자 - 자신의 프로필 조회
    User,
}

impl KnownRole {
    /// 부트스트랩 시 생성되는 역할 (생성 순서).
    pub const ALL: [KnownRole; 2] = [KnownRole::Admin, KnownRole::User];

    /// 저장소에 기록되는 역할 이름.
    pub fn as_str(&self) -> &'static str {
        match self {
            KnownRole::Admin => ROLE_ADMIN,
            KnownRole::User => ROLE_USER,
        }
    }

    /// 역할 이름 파싱. 이름은 대소문자를 구분합니다.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            ROLE_ADMIN => Some(KnownRole::Admin),
            ROLE_USER => Some(KnownRole::User),
            _ => None,
        }
    }
}

impl Default for KnownRole {
    fn default() -> Self {
        KnownRole::User
    }
}

impl std::fmt::Display for KnownRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
