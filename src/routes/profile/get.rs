//! src/routes/profile/get.rs

use crate::authentication::UserId;
use crate::configuration::{LocaleEntry, SiteSettings};
use crate::domain::User;
use crate::error::FdResult;
use crate::routes::ServiceEnvelope;
use crate::utils::flash_messages_as_strings;
use actix_web::{web, Responder};
use actix_web_flash_messages::IncomingFlashMessages;
use askama_actix::Template;
use sqlx::PgPool;

#[derive(Template)]
#[template(path = "profile.html")]
struct ProfileTemplate {
    flash_messages: Vec<String>,
    name: String,
    email: String,
    locale: String,
    locale_choices: Vec<LocaleEntry>,
}

/// The profile form, pre-filled with the authenticated user's data.
#[tracing::instrument(name = "Show profile form", skip_all)]
pub async fn profile_form(
    pool: web::Data<PgPool>,
    site: web::Data<SiteSettings>,
    user_id: web::ReqData<UserId>,
    flash_messages: IncomingFlashMessages,
) -> FdResult<impl Responder> {
    let user = user_id.load(&pool).await?;
    Ok(ProfileTemplate {
        flash_messages: flash_messages_as_strings(&flash_messages),
        name: user.name,
        email: user.email.unwrap_or_default(),
        locale: user.locale,
        locale_choices: site.locale_choices(),
    })
}

/// JSON variant: the serialized entity instead of a rendered form.
#[tracing::instrument(name = "Serve profile entity", skip_all)]
pub async fn profile_service(
    pool: web::Data<PgPool>,
    user_id: web::ReqData<UserId>,
) -> FdResult<web::Json<ServiceEnvelope<User>>> {
    let user = user_id.load(&pool).await?;
    Ok(web::Json(ServiceEnvelope::success(user)))
}
