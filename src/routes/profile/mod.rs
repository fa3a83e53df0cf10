//! src/routes/profile/mod.rs

mod get;
mod post;

use crate::configuration::SiteSettings;
use crate::domain::{EmailAddress, Locale, ProfileUpdate, UserName, ValidationError};

pub use get::{profile_form, profile_service};
pub use post::{update_profile, update_profile_service};

#[derive(serde::Deserialize)]
pub struct ProfileFormData {
    name: String,
    email: String,
    locale: String,
}

impl ProfileFormData {
    /// Validate the submission against the configured locale set.
    fn parse(self, site: &SiteSettings) -> Result<ProfileUpdate, ValidationError> {
        let name = UserName::parse(self.name)?;
        let email = if self.email.trim().is_empty() {
            None
        } else {
            Some(EmailAddress::parse(self.email)?)
        };
        let locale = Locale::parse(self.locale, site)?;
        Ok(ProfileUpdate {
            name,
            email,
            locale,
        })
    }
}
