//! src/routes/welcome/mod.rs

use crate::configuration::SiteSettings;
use crate::utils::flash_messages_as_strings;
use actix_web::{web, Responder};
use actix_web_flash_messages::IncomingFlashMessages;
use askama_actix::Template;

#[derive(Template)]
#[template(path = "welcome.html")]
struct WelcomeTemplate {
    flash_messages: Vec<String>,
    brand_name: String,
}

pub async fn welcome(
    flash_messages: IncomingFlashMessages,
    site: web::Data<SiteSettings>,
) -> impl Responder {
    WelcomeTemplate {
        flash_messages: flash_messages_as_strings(&flash_messages),
        brand_name: site.brand_name.clone(),
    }
}
