//! 애플리케이션 서비스 계층.
//!
//! 저장소 trait 객체를 생성자로 주입받아 계정 관리와 인증 로직을 수행합니다.

pub mod auth;
pub mod bootstrap;
pub mod users;

pub use auth::AuthService;
pub use bootstrap::{seed_admin_user, seed_default_roles};
pub use users::UserService;
