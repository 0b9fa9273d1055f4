//! 도메인 모델.

mod identity;
mod role;
mod store;
mod user;

pub use identity::AuthenticatedIdentity;
pub use role::{KnownRole, Role, ROLE_ADMIN, ROLE_USER};
pub use store::{RoleStore, StoreError, UserStore};
pub use user::{NewUser, User, UserInsert};
