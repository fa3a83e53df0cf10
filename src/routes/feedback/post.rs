//! src/routes/feedback/post.rs

use crate::configuration::SiteSettings;
use crate::domain::EmailAddress;
use crate::email_client::EmailClient;
use crate::error::{Error, FdResult};
use crate::routes::FeedbackFormData;
use crate::utils::see_other;
use actix_web::{web, HttpResponse};
use actix_web_flash_messages::FlashMessage;
use anyhow::Context;

/// Handle a feedback submission: one outbound email, no persistence.
///
/// The configured feedback address is both the recipient and the
/// reply-to fallback when the submitter left no email.
#[tracing::instrument(name = "Send feedback", skip(form, email_client, site))]
pub async fn send_feedback(
    form: web::Form<FeedbackFormData>,
    email_client: web::Data<EmailClient>,
    site: web::Data<SiteSettings>,
) -> FdResult<HttpResponse> {
    let feedback_address = match &site.feedback_email {
        Some(address) => EmailAddress::parse(address.clone())
            .context("The configured feedback address is not a valid email address.")?,
        None => return Err(Error::FeedbackDisabled),
    };
    let feedback = match form.0.parse() {
        Ok(feedback) => feedback,
        Err(e) => {
            FlashMessage::error(e.to_string()).send();
            return Ok(see_other("/feedback/"));
        }
    };

    let subject = format!("[{}] {}", site.brand_name, feedback.subject);
    let submitter = feedback
        .email
        .as_ref()
        .map(AsRef::<str>::as_ref)
        .unwrap_or_default();
    let body = format!("{}\n\n{}", feedback.message, submitter);
    let reply_to = feedback.email.as_ref().unwrap_or(&feedback_address);
    email_client
        .send_email(&feedback_address, &subject, &body, &body, Some(reply_to))
        .await?;

    FlashMessage::info("Thank you for your feedback!").send();
    Ok(see_other("/"))
}
