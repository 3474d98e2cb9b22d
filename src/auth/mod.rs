//! Authentication Module
//! Mission: Password login, JWT bearer tokens and role/ownership gates

pub mod access;
pub mod api;
pub mod credentials;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod user_store;

pub use access::{authorize, Capability};
pub use error::AuthError;
pub use jwt::JwtHandler;
pub use middleware::auth_middleware;
pub use models::{IdentityContext, User, UserRole};
pub use user_store::UserStore;
