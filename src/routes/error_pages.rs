//! src/routes/error_pages.rs

use actix_web::dev::ServiceResponse;
use actix_web::http::header::ContentType;
use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlerResponse, ErrorHandlers};
use actix_web::HttpResponse;
use askama::Template;

/// The HTTP error codes with a uniform presentation.
const HANDLED_STATUS_CODES: [StatusCode; 8] = [
    StatusCode::BAD_REQUEST,
    StatusCode::UNAUTHORIZED,
    StatusCode::FORBIDDEN,
    StatusCode::NOT_FOUND,
    StatusCode::METHOD_NOT_ALLOWED,
    StatusCode::GONE,
    StatusCode::IM_A_TEAPOT,
    StatusCode::INTERNAL_SERVER_ERROR,
];

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    code: u16,
    name: String,
}

#[derive(serde::Serialize)]
struct ErrorEnvelope {
    status: &'static str,
    error_code: u16,
    error_name: String,
    error_message: String,
}

/// Middleware mapping the handled error statuses to a uniform body:
/// a JSON envelope for service paths, a rendered error page otherwise.
pub fn error_page_handlers<B: 'static>() -> ErrorHandlers<B> {
    HANDLED_STATUS_CODES
        .into_iter()
        .fold(ErrorHandlers::new(), |handlers, status| {
            handlers.handler(status, render_error_page)
        })
}

fn render_error_page<B>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let status = res.status();
    // Statuses without a canonical reason present as a plain 500.
    let (code, name) = match status.canonical_reason() {
        Some(reason) => (status, reason),
        None => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
    };
    let is_service = res.request().path().starts_with("/_s/");
    let (req, _) = res.into_parts();

    let response = if is_service {
        HttpResponse::build(code).json(ErrorEnvelope {
            status: "error",
            error_code: code.as_u16(),
            error_name: name.to_lowercase().replace(' ', "_"),
            error_message: name.to_string(),
        })
    } else {
        let body = ErrorTemplate {
            code: code.as_u16(),
            name: name.to_string(),
        }
        .render()
        .map_err(actix_web::error::ErrorInternalServerError)?;
        HttpResponse::build(code)
            .content_type(ContentType::html())
            .body(body)
    };
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}
