//! src/routes/login/get.rs

use crate::utils::flash_messages_as_strings;
use actix_web::Responder;
use actix_web_flash_messages::IncomingFlashMessages;
use askama_actix::Template;

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    flash_messages: Vec<String>,
}

pub async fn login_form(flash_messages: IncomingFlashMessages) -> impl Responder {
    LoginTemplate {
        flash_messages: flash_messages_as_strings(&flash_messages),
    }
}
