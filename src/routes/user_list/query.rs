//! src/routes/user_list/query.rs

use crate::domain::{PageCursor, User, UserOrder, ValidationError};
use crate::error::FdResult;
use anyhow::Context;
use sqlx::{PgPool, Postgres, QueryBuilder};

const DEFAULT_LIMIT: i64 = 20;
const MAX_LIMIT: i64 = 100;

/// Raw query parameters of the user listing endpoints.
#[derive(serde::Deserialize, Debug)]
pub struct UserListQuery {
    pub limit: Option<i64>,
    pub cursor: Option<String>,
    pub order: Option<String>,
    pub name: Option<String>,
    pub admin: Option<bool>,
}

/// Validated listing parameters.
#[derive(Debug)]
pub struct ListParams {
    pub limit: i64,
    pub cursor: PageCursor,
    pub order: UserOrder,
    pub name: Option<String>,
    pub admin: Option<bool>,
}

impl UserListQuery {
    pub fn parse(self) -> Result<ListParams, ValidationError> {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let cursor = match self.cursor {
            Some(raw) => PageCursor::parse(raw)?,
            None => PageCursor::start(),
        };
        let order = match self.order {
            Some(raw) => UserOrder::parse(raw)?,
            None => UserOrder::newest_first(),
        };
        Ok(ListParams {
            limit,
            cursor,
            order,
            name: self.name.filter(|name| !name.is_empty()),
            admin: self.admin,
        })
    }
}

impl ListParams {
    /// Link to the next page, preserving the active filters.
    pub fn more_url(&self, more_cursor: &PageCursor) -> String {
        let mut url = format!(
            "/user/?cursor={}&limit={}&order={}",
            more_cursor.encode(),
            self.limit,
            self.order
        );
        if let Some(name) = &self.name {
            url.push_str("&name=");
            url.push_str(&urlencoding::encode(name));
        }
        if let Some(admin) = self.admin {
            url.push_str("&admin=");
            url.push_str(if admin { "true" } else { "false" });
        }
        url
    }
}

/// Fetch one page of users plus the continuation cursor, if any.
///
/// One extra row is requested to detect whether more results exist.
/// The `user_id` tiebreaker keeps the ordering total, so paging never
/// skips or repeats rows for equal sort keys.
#[tracing::instrument(name = "Retrieve a page of users", skip(pool))]
pub async fn retrieve_users(
    pool: &PgPool,
    params: &ListParams,
) -> FdResult<(Vec<User>, Option<PageCursor>)> {
    let mut query: QueryBuilder<Postgres> = QueryBuilder::new(
        "SELECT user_id, username, name, email, locale, admin, created FROM users WHERE TRUE",
    );
    if let Some(name) = &params.name {
        query.push(" AND name ILIKE ");
        query.push_bind(format!("%{}%", name));
    }
    if let Some(admin) = params.admin {
        query.push(" AND admin = ");
        query.push_bind(admin);
    }
    query.push(" ORDER BY ");
    // a fixed identifier from the whitelist, never user input
    query.push(params.order.field.column());
    query.push(if params.order.descending {
        " DESC"
    } else {
        " ASC"
    });
    query.push(", user_id ASC");
    query.push(" LIMIT ");
    query.push_bind(params.limit + 1);
    query.push(" OFFSET ");
    query.push_bind(params.cursor.offset() as i64);

    let mut users: Vec<User> = query
        .build_query_as()
        .fetch_all(pool)
        .await
        .context("Failed to retrieve a page of users from the database.")?;

    let more_cursor = if users.len() as i64 > params.limit {
        users.truncate(params.limit as usize);
        Some(params.cursor.advanced_by(params.limit as u64))
    } else {
        None
    };
    Ok((users, more_cursor))
}
