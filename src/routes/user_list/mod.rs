//! src/routes/user_list/mod.rs

mod get;
mod query;

pub use get::{user_list, user_list_service};
pub use query::UserListQuery;
