//! src/utils.rs

use actix_web::{http::header::LOCATION, HttpResponse};
use actix_web_flash_messages::IncomingFlashMessages;

/// forward to other location
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

/// Collect incoming flash messages for template rendering.
pub fn flash_messages_as_strings(flash_messages: &IncomingFlashMessages) -> Vec<String> {
    flash_messages
        .iter()
        .map(|m| m.content().to_string())
        .collect()
}
