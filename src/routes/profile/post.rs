//! src/routes/profile/post.rs

use crate::authentication::UserId;
use crate::configuration::SiteSettings;
use crate::domain::{ProfileUpdate, User};
use crate::error::{Error, FdResult};
use crate::routes::{ProfileFormData, ServiceEnvelope};
use crate::utils::see_other;
use actix_web::{web, HttpResponse};
use anyhow::Context;
use actix_web_flash_messages::FlashMessage;
use sqlx::PgPool;

/// Handle a profile form submission.
///
/// On success the updated entity is persisted and the user is sent back
/// to the welcome page, unconditionally. A failed validation flashes the
/// field errors and redisplays the form; nothing is written.
#[tracing::instrument(name = "Update profile", skip_all)]
pub async fn update_profile(
    form: web::Form<ProfileFormData>,
    pool: web::Data<PgPool>,
    site: web::Data<SiteSettings>,
    user_id: web::ReqData<UserId>,
) -> FdResult<HttpResponse> {
    let update = match form.0.parse(&site) {
        Ok(update) => update,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return Ok(see_other("/profile/"));
        }
    };
    update_user_profile(&pool, &user_id, &update).await?;
    FlashMessage::info("Your profile has been updated.").send();
    Ok(see_other("/"))
}

/// JSON variant: persist the update and return the updated entity,
/// no redirect. Validation failures surface as a 400 envelope.
#[tracing::instrument(name = "Update profile entity", skip_all)]
pub async fn update_profile_service(
    form: web::Form<ProfileFormData>,
    pool: web::Data<PgPool>,
    site: web::Data<SiteSettings>,
    user_id: web::ReqData<UserId>,
) -> FdResult<web::Json<ServiceEnvelope<User>>> {
    let update = form.0.parse(&site).map_err(Error::ValidationError)?;
    update_user_profile(&pool, &user_id, &update).await?;
    let user = user_id.load(&pool).await?;
    Ok(web::Json(ServiceEnvelope::success(user)))
}

#[tracing::instrument(name = "Persist profile update", skip(pool, update))]
async fn update_user_profile(
    pool: &PgPool,
    user_id: &UserId,
    update: &ProfileUpdate,
) -> FdResult<()> {
    sqlx::query(
        r#"
        UPDATE users
        SET name = $1, email = $2, locale = $3
        WHERE user_id = $4
        "#,
    )
    .bind(update.name.as_ref())
    .bind(update.email.as_ref().map(AsRef::<str>::as_ref))
    .bind(update.locale.as_ref())
    .bind(**user_id)
    .execute(pool)
    .await
    .context("Failed to update the user's profile in the database.")?;
    Ok(())
}
