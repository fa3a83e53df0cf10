//! src/routes/feedback/get.rs

use crate::configuration::SiteSettings;
use crate::error::{Error, FdResult};
use crate::session_state::TypedSession;
use crate::utils::flash_messages_as_strings;
use actix_web::{web, Responder};
use anyhow::Context;
use actix_web_flash_messages::IncomingFlashMessages;
use askama_actix::Template;
use sqlx::PgPool;

#[derive(Template)]
#[template(path = "feedback.html")]
struct FeedbackTemplate {
    flash_messages: Vec<String>,
    email: String,
}

/// The feedback form. Pre-fills the email field for logged-in users;
/// refuses the request outright when no feedback address is configured.
#[tracing::instrument(name = "Show feedback form", skip_all)]
pub async fn feedback_form(
    pool: web::Data<PgPool>,
    site: web::Data<SiteSettings>,
    session: TypedSession,
    flash_messages: IncomingFlashMessages,
) -> FdResult<impl Responder> {
    if site.feedback_email.is_none() {
        return Err(Error::FeedbackDisabled);
    }
    // The form is open to anonymous visitors; a session is optional.
    let email = match session.get_user_id()? {
        Some(user_id) => {
            sqlx::query_scalar::<_, Option<String>>("SELECT email FROM users WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&**pool)
                .await
                .context("Failed to read the session user's email address.")?
                .flatten()
                .unwrap_or_default()
        }
        None => String::new(),
    };
    Ok(FeedbackTemplate {
        flash_messages: flash_messages_as_strings(&flash_messages),
        email,
    })
}
