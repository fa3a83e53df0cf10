//! src/routes/user_list/get.rs

use super::query::{retrieve_users, UserListQuery};
use crate::domain::User;
use crate::error::{Error, FdResult};
use crate::routes::ServiceListEnvelope;
use crate::utils::flash_messages_as_strings;
use actix_web::{web, Responder};
use actix_web_flash_messages::IncomingFlashMessages;
use askama_actix::Template;
use sqlx::PgPool;

#[derive(Template)]
#[template(path = "user_list.html")]
struct UserListTemplate {
    flash_messages: Vec<String>,
    users: Vec<User>,
    more_url: Option<String>,
}

/// Admin-only listing of users, with filters, ordering and paging.
#[tracing::instrument(name = "List users", skip(pool, flash_messages))]
pub async fn user_list(
    query: web::Query<UserListQuery>,
    pool: web::Data<PgPool>,
    flash_messages: IncomingFlashMessages,
) -> FdResult<impl Responder> {
    let params = query.into_inner().parse().map_err(Error::ValidationError)?;
    let (users, more_cursor) = retrieve_users(&pool, &params).await?;
    let more_url = more_cursor.map(|cursor| params.more_url(&cursor));
    Ok(UserListTemplate {
        flash_messages: flash_messages_as_strings(&flash_messages),
        users,
        more_url,
    })
}

/// JSON variant: entities plus the continuation cursor.
#[tracing::instrument(name = "List user entities", skip(pool))]
pub async fn user_list_service(
    query: web::Query<UserListQuery>,
    pool: web::Data<PgPool>,
) -> FdResult<web::Json<ServiceListEnvelope<User>>> {
    let params = query.into_inner().parse().map_err(Error::ValidationError)?;
    let (users, more_cursor) = retrieve_users(&pool, &params).await?;
    Ok(web::Json(ServiceListEnvelope::success(
        users,
        more_cursor.map(|cursor| cursor.encode()),
    )))
}
