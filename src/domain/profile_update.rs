//! src/domain/profile_update.rs

use crate::domain::{EmailAddress, Locale, UserName};

/// A validated profile submission, ready to be persisted.
#[derive(Debug)]
pub struct ProfileUpdate {
    pub name: UserName,
    pub email: Option<EmailAddress>,
    pub locale: Locale,
}
