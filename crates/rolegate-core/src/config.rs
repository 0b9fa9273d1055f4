//! 설정 관리.
//!
//! 기본값 → 설정 파일(선택) → 환경 변수 순서로 덮어씁니다.
//! 환경 변수는 `ROLEGATE` 접두사와 `__` 구분자를 사용합니다
//! (예: `ROLEGATE__JWT__SECRET`, `ROLEGATE__SERVER__PORT`).

use serde::{Deserialize, Serialize};
use std::path::Path;

/// 개발용 기본 JWT 비밀 키.
pub const DEV_JWT_SECRET: &str = "dev-secret-key-change-in-production-at-least-32-bytes";

/// 기본 토큰 수명 (24시간).
pub const DEFAULT_JWT_EXPIRATION_MS: i64 = 86_400_000;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 데이터베이스 설정
    #[serde(default)]
    pub database: DatabaseConfig,
    /// JWT 설정
    #[serde(default)]
    pub jwt: JwtConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
    /// 초기 데이터 설정
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
    /// 허용 CORS origin 목록 (쉼표 구분)
    #[serde(default)]
    pub cors_origins: Option<String>,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// `host:port` 문자열.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// PostgreSQL 연결 URL (없으면 인메모리 저장소 사용)
    #[serde(default)]
    pub url: Option<String>,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 타임아웃 (초)
    pub connection_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            connection_timeout_secs: 10,
        }
    }
}

/// JWT 설정.
#[derive(Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// 서명 비밀 키
    #[serde(default)]
    pub secret: Option<String>,
    /// 토큰 수명 (밀리초)
    pub expiration_ms: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: None,
            expiration_ms: DEFAULT_JWT_EXPIRATION_MS,
        }
    }
}

impl JwtConfig {
    /// 설정된 비밀 키 또는 개발용 기본값.
    ///
    /// 빈 문자열은 설정되지 않은 것으로 취급합니다.
    pub fn secret_or_default(&self) -> &str {
        self.secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEV_JWT_SECRET)
    }

    /// 비밀 키가 명시적으로 설정되었는지 확인.
    pub fn has_secret(&self) -> bool {
        self.secret.as_deref().is_some_and(|s| !s.is_empty())
    }
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("expiration_ms", &self.expiration_ms)
            .finish()
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// 초기 관리자 계정 설정.
///
/// 이메일과 비밀번호가 모두 설정된 경우에만 시작 시 관리자 계정을 생성합니다.
#[derive(Clone, Default, Deserialize, Serialize)]
pub struct BootstrapConfig {
    #[serde(default)]
    pub admin_email: Option<String>,
    #[serde(default)]
    pub admin_password: Option<String>,
    #[serde(default)]
    pub admin_name: Option<String>,
}

impl BootstrapConfig {
    /// (이름, 이메일, 비밀번호) - 관리자 생성이 설정된 경우.
    pub fn admin_account(&self) -> Option<(&str, &str, &str)> {
        match (self.admin_email.as_deref(), self.admin_password.as_deref()) {
            (Some(email), Some(password)) if !email.is_empty() && !password.is_empty() => Some((
                self.admin_name.as_deref().unwrap_or("Administrator"),
                email,
                password,
            )),
            _ => None,
        }
    }
}

impl std::fmt::Debug for BootstrapConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapConfig")
            .field("admin_email", &self.admin_email)
            .field("admin_password", &self.admin_password.as_ref().map(|_| "[REDACTED]"))
            .field("admin_name", &self.admin_name)
            .finish()
    }
}

impl AppConfig {
    /// 파일(선택)과 환경 변수에서 설정을 로드합니다.
    ///
    /// `database.url`이 설정되지 않았으면 `DATABASE_URL`을,
    /// `jwt.secret`이 설정되지 않았으면 `JWT_SECRET`을 사용합니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.max_connections", 10)?
            .set_default("database.connection_timeout_secs", 10)?
            .set_default("jwt.expiration_ms", DEFAULT_JWT_EXPIRATION_MS)?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // 파일에서 로드 (없어도 됨)
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix("ROLEGATE")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut config: AppConfig = builder.build()?.try_deserialize()?;

        if config.database.url.is_none() {
            config.database.url = std::env::var("DATABASE_URL").ok();
        }
        if !config.jwt.has_secret() {
            config.jwt.secret = std::env::var("JWT_SECRET").ok();
        }

        config.validate()?;
        Ok(config)
    }

    /// 로드된 값의 범위를 검사합니다.
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        if self.jwt.expiration_ms <= 0 {
            return Err(config::ConfigError::Message(format!(
                "jwt.expiration_ms must be positive, got {}",
                self.jwt.expiration_ms
            )));
        }
        Ok(())
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, config::ConfigError> {
        Self::load("config/default.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.jwt.expiration_ms, DEFAULT_JWT_EXPIRATION_MS);
        assert!(!config.jwt.has_secret());
        assert_eq!(config.jwt.secret_or_default(), DEV_JWT_SECRET);
        assert!(config.database.url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_secret_falls_back_to_default() {
        let jwt = JwtConfig {
            secret: Some(String::new()),
            expiration_ms: 1000,
        };
        assert!(!jwt.has_secret());
        assert_eq!(jwt.secret_or_default(), DEV_JWT_SECRET);

        let jwt = JwtConfig {
            secret: Some("configured".to_string()),
            expiration_ms: 1000,
        };
        assert!(jwt.has_secret());
        assert_eq!(jwt.secret_or_default(), "configured");
    }

    #[test]
    fn test_non_positive_expiration_rejected() {
        for expiration_ms in [0, -1] {
            let app = AppConfig {
                jwt: JwtConfig {
                    secret: None,
                    expiration_ms,
                },
                ..AppConfig::default()
            };
            assert!(matches!(
                app.validate(),
                Err(config::ConfigError::Message(_))
            ));
        }
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = AppConfig::load("does/not/exist.toml").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_secrets_are_redacted_in_debug() {
        let jwt = JwtConfig {
            secret: Some("super-secret".to_string()),
            expiration_ms: 1000,
        };
        assert!(!format!("{:?}", jwt).contains("super-secret"));

        let bootstrap = BootstrapConfig {
            admin_email: Some("admin@x.com".to_string()),
            admin_password: Some("hunter2".to_string()),
            admin_name: None,
        };
        assert!(!format!("{:?}", bootstrap).contains("hunter2"));
    }

    #[test]
    fn test_admin_account_requires_email_and_password() {
        let mut bootstrap = BootstrapConfig::default();
        assert!(bootstrap.admin_account().is_none());

        bootstrap.admin_email = Some("admin@x.com".to_string());
        assert!(bootstrap.admin_account().is_none());

        bootstrap.admin_password = Some("pw".to_string());
        assert_eq!(
            bootstrap.admin_account(),
            Some(("Administrator", "admin@x.com", "pw"))
        );
    }
}
