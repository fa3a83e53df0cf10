//! src/routes/feedback/mod.rs

mod get;
mod post;

use crate::domain::{EmailAddress, ValidationError};

pub use get::feedback_form;
pub use post::send_feedback;

#[derive(serde::Deserialize)]
pub struct FeedbackFormData {
    subject: String,
    message: String,
    email: String,
}

/// A validated feedback submission. Transient, never persisted.
#[derive(Debug)]
struct Feedback {
    subject: String,
    message: String,
    email: Option<EmailAddress>,
}

impl FeedbackFormData {
    fn parse(self) -> Result<Feedback, ValidationError> {
        let subject = self.subject.trim().to_string();
        if subject.is_empty() {
            return Err(ValidationError::MissingSubject);
        }
        let message = self.message.trim().to_string();
        if message.is_empty() {
            return Err(ValidationError::MissingMessage);
        }
        let email = if self.email.trim().is_empty() {
            None
        } else {
            Some(EmailAddress::parse(self.email)?)
        };
        Ok(Feedback {
            subject,
            message,
            email,
        })
    }
}
