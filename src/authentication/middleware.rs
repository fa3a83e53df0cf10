//! src/authentication/middleware.rs

use crate::domain::User;
use crate::error::{Error, FdResult};
use crate::session_state::{SessionError, TypedSession};
use actix_web::{
    body::{BoxBody, MessageBody},
    dev::{ServiceRequest, ServiceResponse},
    web, FromRequest, HttpMessage, ResponseError,
};
use actix_web_lab::middleware::Next;
use anyhow::Context;
use sqlx::PgPool;
use std::ops::Deref;
use uuid::Uuid;

/// Require a logged-in session; insert the authenticated identity into
/// the request extensions so handlers receive it via `web::ReqData<UserId>`.
///
/// Refusals are returned as responses, not errors, so the error page
/// middleware gets to format them.
pub async fn reject_anonymous_users(
    mut req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, actix_web::Error> {
    let session = {
        let (http_request, payload) = req.parts_mut();
        TypedSession::from_request(http_request, payload).await
    }?;

    match session.get_user_id() {
        Ok(Some(user_id)) => {
            req.extensions_mut().insert(UserId(user_id));
            Ok(next.call(req).await?.map_into_boxed_body())
        }
        Ok(None) => {
            let e = Error::from(SessionError::UserNotLoggedIn);
            Ok(req.into_response(e.error_response()))
        }
        Err(e) => Ok(req.into_response(e.error_response())),
    }
}

/// Require the authenticated user to carry the admin flag.
///
/// Must run after `reject_anonymous_users`.
pub async fn reject_non_admin_users(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, actix_web::Error> {
    let user_id = req.extensions().get::<UserId>().copied();
    let user_id = match user_id {
        Some(user_id) => user_id,
        None => {
            let e = Error::from(SessionError::UserNotLoggedIn);
            return Ok(req.into_response(e.error_response()));
        }
    };
    let pool = match req.app_data::<web::Data<PgPool>>().cloned() {
        Some(pool) => pool,
        None => {
            let e = Error::UnexpectedError(anyhow::anyhow!("Database pool missing in app data."));
            return Ok(req.into_response(e.error_response()));
        }
    };
    match user_id.load(&pool).await {
        Ok(user) if user.admin => Ok(next.call(req).await?.map_into_boxed_body()),
        Ok(user) => {
            let e = Error::ForbiddenError(anyhow::anyhow!(
                "User `{}` is not an administrator.",
                user.username
            ));
            Ok(req.into_response(e.error_response()))
        }
        Err(e) => Ok(req.into_response(e.error_response())),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UserId(Uuid);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Deref for UserId {
    type Target = Uuid;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl UserId {
    /// Fetch the full user entity behind the session identity.
    #[tracing::instrument(name = "Load user from UserId", skip(pool))]
    pub async fn load(&self, pool: &PgPool) -> FdResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, name, email, locale, admin, created
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(self.0)
        .fetch_optional(pool)
        .await
        .context("Failed to perform a query to retrieve the session user.")?;
        Ok(user.ok_or(SessionError::UserNotFound)?)
    }
}
