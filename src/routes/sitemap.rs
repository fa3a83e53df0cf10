//! src/routes/sitemap.rs

use crate::configuration::SiteSettings;
use crate::error::FdResult;
use actix_web::{web, HttpRequest, HttpResponse};
use anyhow::Context;
use askama::Template;

#[derive(Template)]
#[template(path = "sitemap.xml")]
struct SitemapTemplate<'a> {
    host_url: &'a str,
    lastmod: String,
}

pub async fn sitemap(req: HttpRequest, site: web::Data<SiteSettings>) -> FdResult<HttpResponse> {
    let connection_info = req.connection_info();
    let host_url = format!("{}://{}", connection_info.scheme(), connection_info.host());
    let body = SitemapTemplate {
        host_url: &host_url,
        lastmod: site.current_version_date.format("%Y-%m-%d").to_string(),
    }
    .render()
    .context("Failed to render the sitemap template.")?;
    Ok(HttpResponse::Ok()
        .content_type("application/xml")
        .body(body))
}
