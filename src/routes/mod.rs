//! src/routes/mod.rs

mod error_pages;
mod feedback;
mod login;
mod logout;
mod profile;
mod sitemap;
mod user_list;
mod welcome;

pub use error_pages::error_page_handlers;
pub use feedback::*;
pub use login::*;
pub use logout::log_out;
pub use profile::*;
pub use sitemap::sitemap;
pub use user_list::*;
pub use welcome::welcome;

/// Envelope for the JSON service variants of the HTML endpoints.
#[derive(serde::Serialize)]
pub struct ServiceEnvelope<T: serde::Serialize> {
    pub status: &'static str,
    pub result: T,
}

impl<T: serde::Serialize> ServiceEnvelope<T> {
    pub fn success(result: T) -> Self {
        Self {
            status: "success",
            result,
        }
    }
}

/// Envelope for JSON list responses, carrying the continuation cursor.
#[derive(serde::Serialize)]
pub struct ServiceListEnvelope<T: serde::Serialize> {
    pub status: &'static str,
    pub result: Vec<T>,
    pub more_cursor: Option<String>,
}

impl<T: serde::Serialize> ServiceListEnvelope<T> {
    pub fn success(result: Vec<T>, more_cursor: Option<String>) -> Self {
        Self {
            status: "success",
            result,
            more_cursor,
        }
    }
}
