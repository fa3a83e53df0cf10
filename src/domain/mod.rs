//! src/domain/mod.rs

mod email_address;
mod locale;
mod page_cursor;
mod profile_update;
mod user;
mod user_name;
mod user_order;

pub use email_address::EmailAddress;
pub use locale::Locale;
pub use page_cursor::PageCursor;
pub use profile_update::ProfileUpdate;
pub use user::User;
pub use user_name::UserName;
pub use user_order::{OrderField, UserOrder};

/// Validation error for domain data
#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("`{0}` is not a valid email address.")]
    InvalidEmail(String),
    #[error("`{0}` is not a valid user name.")]
    InvalidName(String),
    #[error("`{0}` is not a supported locale.")]
    InvalidLocale(String),
    #[error("Subject is required.")]
    MissingSubject,
    #[error("Message is required.")]
    MissingMessage,
    #[error("`{0}` is not a valid order field.")]
    InvalidOrderField(String),
    #[error("`{0}` is not a valid pagination cursor.")]
    InvalidCursor(String),
}
