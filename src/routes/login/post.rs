//! src/routes/login/post.rs

use crate::authentication::{validate_credentials, Credentials, CredentialsError};
use crate::error::Error;
use crate::session_state::TypedSession;
use crate::utils::see_other;
use actix_web::{error::InternalError, web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use secrecy::Secret;
use sqlx::PgPool;

#[derive(serde::Deserialize)]
pub struct FormData {
    username: String,
    password: Secret<String>,
}

#[tracing::instrument(
    skip(form, pool, session),
    fields(username=tracing::field::Empty, user_id=tracing::field::Empty)
)]
pub async fn login(
    form: web::Form<FormData>,
    pool: web::Data<PgPool>,
    session: TypedSession,
) -> Result<HttpResponse, InternalError<Error>> {
    let credentials = Credentials {
        username: form.0.username,
        password: form.0.password,
    };
    tracing::Span::current().record("username", &tracing::field::display(&credentials.username));
    match validate_credentials(credentials, &pool).await {
        Ok(user_id) => {
            tracing::Span::current().record("user_id", &tracing::field::display(&user_id));
            session.renew();
            session
                .insert_user_id(user_id)
                .map_err(login_redirect)?;
            Ok(see_other("/profile/"))
        }
        Err(e) => {
            let e = match e {
                CredentialsError::UnexpectedError(_) => Error::UnexpectedError(e.into()),
                _ => Error::AuthError(e.into()),
            };
            Err(login_redirect(e))
        }
    }
}

fn login_redirect(e: Error) -> InternalError<Error> {
    FlashMessage::error("Failed Login Authentication").send();
    let response = see_other("/login");
    InternalError::from_response(e, response)
}
