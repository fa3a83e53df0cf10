//! src/domain/user_order.rs

use crate::domain::ValidationError;

/// Whitelisted user columns the listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    Created,
    Name,
    Email,
}

impl OrderField {
    /// Column name to interpolate into the query.
    ///
    /// Only ever returns fixed identifiers, never user input.
    pub fn column(&self) -> &'static str {
        match self {
            OrderField::Created => "created",
            OrderField::Name => "name",
            OrderField::Email => "email",
        }
    }
}

/// A parsed `order` query parameter, e.g. `-created` or `name`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserOrder {
    pub field: OrderField,
    pub descending: bool,
}

impl UserOrder {
    /// Newest-created first, the listing default.
    pub fn newest_first() -> Self {
        Self {
            field: OrderField::Created,
            descending: true,
        }
    }

    pub fn parse(s: String) -> Result<UserOrder, ValidationError> {
        let (raw_field, descending) = match s.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (s.as_str(), false),
        };
        let field = match raw_field {
            "created" => OrderField::Created,
            "name" => OrderField::Name,
            "email" => OrderField::Email,
            _ => return Err(ValidationError::InvalidOrderField(s)),
        };
        Ok(Self { field, descending })
    }
}

impl std::fmt::Display for UserOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.descending {
            write!(f, "-")?;
        }
        write!(f, "{}", self.field.column())
    }
}
