//! src/domain/user.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A persisted user entity.
///
/// Created by the registration flow, mutated by the profile handler
/// (name/email/locale) or administratively; never deleted here.
#[derive(Debug, serde::Serialize, sqlx::FromRow)]
pub struct User {
    pub user_id: Uuid,
    pub username: String,
    pub name: String,
    pub email: Option<String>,
    pub locale: String,
    pub admin: bool,
    pub created: DateTime<Utc>,
}
