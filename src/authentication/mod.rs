//! src/authentication/mod.rs

mod middleware;
mod password;

pub use middleware::{reject_anonymous_users, reject_non_admin_users, UserId};
pub use password::{validate_credentials, Credentials, CredentialsError};
