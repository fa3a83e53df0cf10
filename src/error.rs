//! src/error.rs

use crate::domain::ValidationError;
use crate::session_state::SessionError;
use actix_web::http::StatusCode;
use actix_web::ResponseError;

pub type FdResult<T> = Result<T, Error>;

pub fn error_chain_fmt(
    e: &impl std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{}\n", e)?;
    let mut current = e.source();
    while let Some(cause) = current {
        writeln!(f, "Caused by:\n\t{}", cause)?;
        current = cause.source();
    }
    Ok(())
}

#[derive(thiserror::Error)]
pub enum Error {
    #[error("Invalid input")]
    ValidationError(#[from] ValidationError),
    #[error("Authentication required")]
    AuthError(#[source] anyhow::Error),
    #[error("Admin privileges required")]
    ForbiddenError(#[source] anyhow::Error),
    #[error("Feedback is disabled")]
    FeedbackDisabled,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for Error {
    // Presentation of the body is centralized in the error page
    // middleware, see `routes::error_pages`; only the status matters here.
    fn status_code(&self) -> StatusCode {
        match self {
            Error::ValidationError(_) => StatusCode::BAD_REQUEST,
            Error::AuthError(_) => StatusCode::UNAUTHORIZED,
            Error::ForbiddenError(_) => StatusCode::FORBIDDEN,
            Error::FeedbackDisabled => StatusCode::IM_A_TEAPOT,
            Error::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<SessionError> for Error {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::UserNotLoggedIn | SessionError::UserNotFound => {
                Error::AuthError(e.into())
            }
            _ => Error::UnexpectedError(e.into()),
        }
    }
}
