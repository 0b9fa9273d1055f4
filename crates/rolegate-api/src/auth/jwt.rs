//! JWT 토큰 처리.
//!
//! 로그인 성공 시 발급하는 Access Token의 생성/검증 로직.
//! 토큰은 상태가 없으며 유효성은 (서명, 현재 시각)만으로 결정됩니다.

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::metrics::record_token_rejected;

/// JWT 페이로드.
///
/// 누락된 클레임은 역직렬화 단계가 아니라 필수 클레임 검사에서 거부되도록
/// 기본값을 허용합니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - 사용자 이메일
    #[serde(default)]
    pub sub: String,
    /// Issued At - 토큰 발급 시간 (Unix timestamp)
    #[serde(default)]
    pub iat: i64,
    /// Expiration - 토큰 만료 시간 (Unix timestamp)
    #[serde(default)]
    pub exp: i64,
}

/// 토큰 검증 실패 분류.
///
/// 로그와 메트릭에만 사용되며 호출자에게는 단일 실패로 노출됩니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenErrorKind {
    /// 서명 불일치
    InvalidSignature,
    /// 형식이 잘못된 토큰
    Malformed,
    /// 만료된 토큰
    Expired,
    /// 지원하지 않는 알고리즘/형식
    Unsupported,
    /// 비어 있는 토큰 또는 필수 클레임 누락
    EmptyClaims,
}

impl TokenErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenErrorKind::InvalidSignature => "invalid_signature",
            TokenErrorKind::Malformed => "malformed",
            TokenErrorKind::Expired => "expired",
            TokenErrorKind::Unsupported => "unsupported",
            TokenErrorKind::EmptyClaims => "empty_claims",
        }
    }

    fn from_jwt(kind: &ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidSignature => TokenErrorKind::InvalidSignature,
            ErrorKind::ExpiredSignature => TokenErrorKind::Expired,
            ErrorKind::InvalidToken
            | ErrorKind::Base64(_)
            | ErrorKind::Json(_)
            | ErrorKind::Utf8(_) => TokenErrorKind::Malformed,
            ErrorKind::MissingRequiredClaim(_) => TokenErrorKind::EmptyClaims,
            _ => TokenErrorKind::Unsupported,
        }
    }
}

impl std::fmt::Display for TokenErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JWT 토큰 에러.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("토큰 인코딩 실패: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
    #[error("유효하지 않은 토큰 ({kind}): {message}")]
    Rejected {
        kind: TokenErrorKind,
        message: String,
    },
}

impl TokenError {
    fn rejected(kind: TokenErrorKind, message: impl Into<String>) -> Self {
        TokenError::Rejected {
            kind,
            message: message.into(),
        }
    }

    /// 검증 실패 분류 (인코딩 에러는 None).
    pub fn kind(&self) -> Option<TokenErrorKind> {
        match self {
            TokenError::Encoding(_) => None,
            TokenError::Rejected { kind, .. } => Some(*kind),
        }
    }
}

/// 토큰 발급/검증기.
///
/// 설정된 비밀 문자열에서 HS256 대칭 키를 만들어 사용합니다.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime_ms: i64,
}

impl TokenIssuer {
    /// 새 발급기 생성.
    ///
    /// # Arguments
    ///
    /// * `secret` - 서명 비밀 키
    /// * `lifetime_ms` - 토큰 수명 (밀리초)
    pub fn new(secret: &str, lifetime_ms: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            lifetime_ms,
        }
    }

    /// 현재 시각 기준으로 토큰 발급.
    pub fn issue(&self, subject: &str) -> Result<String, TokenError> {
        self.issue_at(subject, Utc::now().timestamp_millis())
    }

    /// 주어진 시각(밀리초) 기준으로 토큰 발급.
    ///
    /// `exp`는 `now + lifetime`을 초 단위로 내림한 값입니다 (오버플로 시 최댓값으로 고정).
    pub fn issue_at(&self, subject: &str, now_ms: i64) -> Result<String, TokenError> {
        let claims = Claims {
            sub: subject.to_string(),
            iat: now_ms.div_euclid(1000),
            exp: now_ms.saturating_add(self.lifetime_ms).div_euclid(1000),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(TokenError::from)
    }

    /// 토큰 디코딩 및 검증.
    ///
    /// 서명과 `now < exp`를 확인하고 실패 원인을 분류합니다.
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::rejected(
                TokenErrorKind::EmptyClaims,
                "토큰 문자열이 비어 있습니다",
            ));
        }

        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| TokenError::rejected(TokenErrorKind::from_jwt(e.kind()), e.to_string()))?;
        let claims = data.claims;

        // jsonwebtoken은 exp == now를 허용하므로 경계값을 직접 거부
        if claims.exp <= Utc::now().timestamp() {
            return Err(TokenError::rejected(
                TokenErrorKind::Expired,
                format!("토큰이 만료되었습니다 (exp={})", claims.exp),
            ));
        }

        if claims.sub.is_empty() {
            return Err(TokenError::rejected(
                TokenErrorKind::EmptyClaims,
                "subject 클레임이 비어 있습니다",
            ));
        }

        Ok(claims)
    }

    /// 토큰 유효성 검사.
    ///
    /// 실패 원인은 분류되어 로그와 메트릭에 기록되고, 결과는 통과/실패로만 반환됩니다.
    pub fn verify(&self, token: &str) -> bool {
        match self.validate(token) {
            Ok(_) => true,
            Err(e) => {
                let kind = e.kind().unwrap_or(TokenErrorKind::Malformed);
                warn!(kind = %kind, error = %e, "JWT verification failed");
                record_token_rejected(kind.as_str());
                false
            }
        }
    }

    /// 토큰의 subject 클레임 추출.
    ///
    /// [`verify`](Self::verify)를 통과한 토큰에 사용해야 하며,
    /// 유효하지 않은 토큰이면 파싱 에러를 그대로 반환합니다.
    pub fn subject_of(&self, token: &str) -> Result<String, TokenError> {
        self.validate(token).map(|claims| claims.sub)
    }
}
