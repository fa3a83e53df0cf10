//! src/domain/page_cursor.rs

use crate::domain::ValidationError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// An opaque pagination token referencing a position in an ordered
/// query result set.
///
/// Clients must treat the encoded form as a black box; the layout may
/// change between releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor(u64);

impl PageCursor {
    pub fn start() -> Self {
        Self(0)
    }

    pub fn offset(&self) -> u64 {
        self.0
    }

    /// The cursor pointing at the page following `count` consumed rows.
    pub fn advanced_by(&self, count: u64) -> Self {
        Self(self.0 + count)
    }

    pub fn parse(s: String) -> Result<PageCursor, ValidationError> {
        let decoded = URL_SAFE_NO_PAD
            .decode(s.as_bytes())
            .map_err(|_| ValidationError::InvalidCursor(s.clone()))?;
        let decoded =
            String::from_utf8(decoded).map_err(|_| ValidationError::InvalidCursor(s.clone()))?;
        let offset = decoded
            .strip_prefix("o:")
            .and_then(|raw| raw.parse::<u64>().ok())
            .ok_or(ValidationError::InvalidCursor(s))?;
        Ok(Self(offset))
    }

    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(format!("o:{}", self.0))
    }
}
