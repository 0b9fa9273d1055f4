//! 로그인 및 토큰 인증 서비스.

use std::sync::Arc;

use rolegate_core::{AccountError, AccountResult, AuthenticatedIdentity, User, UserStore};
use tracing::{debug, warn};

use crate::auth::{CredentialHasher, TokenIssuer};
use crate::metrics::record_login;

/// 인증 서비스.
///
/// 자격 증명을 확인하여 토큰을 발급하고, 토큰을 요청 범위 인증 주체로 변환합니다.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    hasher: CredentialHasher,
    tokens: Arc<TokenIssuer>,
    /// 계정이 없거나 비밀번호가 없을 때 검증할 해시
    decoy_hash: Option<Arc<str>>,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, hasher: CredentialHasher, tokens: Arc<TokenIssuer>) -> Self {
        let decoy_hash = match hasher.decoy_hash() {
            Ok(hash) => Some(Arc::from(hash)),
            Err(e) => {
                warn!(error = %e, "Failed to prepare decoy password hash");
                None
            }
        };

        Self {
            users,
            hasher,
            tokens,
            decoy_hash,
        }
    }

    /// 토큰 발급기.
    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// 이메일/비밀번호 확인.
    ///
    /// 알 수 없는 이메일, 비밀번호 불일치, 비밀번호 없는 계정은 모두 같은
    /// [`AccountError::AuthenticationFailed`]로 반환됩니다.
    ///
    /// 계정이나 해시가 없어도 미끼 해시로 같은 비용의 검증을 수행하므로
    /// 응답 시간으로 계정 존재 여부를 알 수 없습니다.
    pub async fn authenticate_credentials(&self, email: &str, password: &str) -> AccountResult<User> {
        let user = self.users.find_by_email(email).await?;

        let Some(hash) = user.as_ref().and_then(|u| u.password_hash.as_deref()) else {
            self.verify_decoy(password);
            return Err(AccountError::AuthenticationFailed);
        };

        if !self.hasher.matches(password, hash) {
            return Err(AccountError::AuthenticationFailed);
        }

        user.ok_or(AccountError::AuthenticationFailed)
    }

    fn verify_decoy(&self, password: &str) {
        if let Some(decoy) = self.decoy_hash.as_deref() {
            // 결과는 버림
            let _ = self.hasher.matches(password, decoy);
        }
    }

    /// 로그인 후 서명된 토큰 반환.
    pub async fn login(&self, email: &str, password: &str) -> AccountResult<String> {
        let user = match self.authenticate_credentials(email, password).await {
            Ok(user) => user,
            Err(e) => {
                if matches!(e, AccountError::AuthenticationFailed) {
                    debug!("Login rejected");
                    record_login("failure");
                }
                return Err(e);
            }
        };

        let identity = AuthenticatedIdentity::new(user.email, user.role);
        let token = self
            .tokens
            .issue(&identity.email)
            .map_err(|e| AccountError::TokenIssue(e.to_string()))?;

        debug!(role = %identity.role, "Login succeeded");
        record_login("success");
        Ok(token)
    }

    /// 토큰을 인증 주체로 변환.
    ///
    /// 토큰이 유효해도 subject가 더 이상 사용자로 조회되지 않으면 거부합니다.
    /// 역할은 토큰이 아니라 현재 저장된 값을 사용합니다.
    pub async fn authenticate(&self, token: &str) -> AccountResult<AuthenticatedIdentity> {
        if !self.tokens.verify(token) {
            return Err(AccountError::TokenInvalid);
        }

        let subject = self
            .tokens
            .subject_of(token)
            .map_err(|_| AccountError::TokenInvalid)?;

        match self.users.find_by_email(&subject).await? {
            Some(user) => Ok(AuthenticatedIdentity::new(user.email, user.role)),
            None => {
                warn!("Token subject no longer resolves to a user");
                Err(AccountError::TokenInvalid)
            }
        }
    }
}
