//! src/domain/locale.rs

use crate::configuration::SiteSettings;
use crate::domain::ValidationError;

/// A locale code constrained to the configured locale set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(String);

impl Locale {
    pub fn parse(s: String, site: &SiteSettings) -> Result<Locale, ValidationError> {
        let trimmed = s.trim();
        if site.supports_locale(trimmed) {
            Ok(Self(trimmed.to_string()))
        } else {
            Err(ValidationError::InvalidLocale(s))
        }
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
