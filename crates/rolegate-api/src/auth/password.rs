//! 비밀번호 해싱 유틸리티.
//!
//! Argon2 기반 비밀번호 해싱 및 검증.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};

#[cfg(test)]
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// 존재하지 않는 계정 검증에 쓰는 고정 입력.
const DECOY_PASSWORD: &str = "rolegate-decoy-credential";

/// 비밀번호 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("비밀번호 해싱 실패")]
    HashingFailed,
    #[error("비밀번호 검증 실패")]
    VerificationFailed,
    #[error("잘못된 해시 형식")]
    InvalidHashFormat,
    #[error("잘못된 Argon2 파라미터: {0}")]
    InvalidParams(String),
}

/// 단방향 비밀번호 해셔.
///
/// 새 해시는 설정된 파라미터로 생성하고, 검증은 PHC 문자열에 기록된
/// 파라미터를 사용하므로 파라미터가 바뀌어도 기존 해시를 검증할 수 있습니다.
#[derive(Clone)]
pub struct CredentialHasher {
    argon2: Argon2<'static>,
    #[cfg(test)]
    verifications: Arc<AtomicUsize>,
}

impl Default for CredentialHasher {
    fn default() -> Self {
        Self {
            argon2: Argon2::default(),
            #[cfg(test)]
            verifications: Arc::default(),
        }
    }
}

impl CredentialHasher {
    /// 사용자 정의 Argon2id 파라미터로 생성.
    ///
    /// # Arguments
    ///
    /// * `m_cost` - 메모리 비용 (KiB)
    /// * `t_cost` - 반복 횟수
    /// * `p_cost` - 병렬도
    pub fn with_params(m_cost: u32, t_cost: u32, p_cost: u32) -> Result<Self, PasswordError> {
        let params = Params::new(m_cost, t_cost, p_cost, None)
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            #[cfg(test)]
            verifications: Arc::default(),
        })
    }

    /// 비밀번호 해싱.
    ///
    /// 솔트는 자동으로 생성되며 PHC 형식 문자열을 반환합니다.
    ///
    /// ```rust,ignore
    /// let hash = CredentialHasher::default().hash("my_secure_password").unwrap();
    /// // "$argon2id$v=19$m=19456,t=2,p=1$..."
    /// ```
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| PasswordError::HashingFailed)?;

        Ok(hash.to_string())
    }

    /// 현재 파라미터로 만든 미끼 해시.
    ///
    /// 계정이 없을 때도 실제 계정과 같은 비용의 검증을 수행하기 위해 사용합니다.
    pub fn decoy_hash(&self) -> Result<String, PasswordError> {
        self.hash(DECOY_PASSWORD)
    }

    /// 비밀번호 검증.
    ///
    /// 일치하면 Ok(()), 불일치하거나 해시 형식이 잘못되었으면 Err.
    pub fn verify(&self, password: &str, hash: &str) -> Result<(), PasswordError> {
        #[cfg(test)]
        self.verifications.fetch_add(1, Ordering::SeqCst);

        let parsed_hash = PasswordHash::new(hash).map_err(|_| PasswordError::InvalidHashFormat)?;

        self.argon2
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| PasswordError::VerificationFailed)
    }

    /// 비밀번호가 해시와 일치하는지 여부.
    pub fn matches(&self, password: &str, hash: &str) -> bool {
        self.verify(password, hash).is_ok()
    }

    /// 지금까지 수행한 검증 횟수 (복제본끼리 공유).
    #[cfg(test)]
    pub(crate) fn verification_count(&self) -> usize {
        self.verifications.load(Ordering::SeqCst)
    }
}
