//! src/startup.rs

use crate::configuration::{DatabaseSettings, Settings, SiteSettings};
use crate::email_client::EmailClient;
use crate::error::FdResult;
use crate::routes::{
    error_page_handlers, feedback_form, log_out, login, login_form, profile_form, profile_service,
    send_feedback, sitemap, update_profile, update_profile_service, user_list, user_list_service,
    welcome,
};
use crate::authentication::{reject_anonymous_users, reject_non_admin_users};
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::Key;
use actix_web::dev::Server;
use actix_web::{web, web::Data, App, HttpServer};
use actix_web_flash_messages::storage::CookieMessageStore;
use actix_web_flash_messages::FlashMessagesFramework;
use actix_web_lab::middleware::from_fn;
use anyhow::Context;
use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(configuration: Settings) -> FdResult<Self> {
        let connection_pool = get_connection_pool(&configuration.database);
        let email_client = configuration.emailclient.client();

        let address = format!(
            "{}:{}",
            configuration.application.host, configuration.application.port
        );
        let listener = TcpListener::bind(address).context("Failed to bind a listener.")?;
        let port = listener
            .local_addr()
            .context("Failed to read the listener address.")?
            .port();
        let server = run(
            listener,
            connection_pool,
            email_client,
            configuration.application.hmac_secret,
            configuration.site,
        )
        .await?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn get_connection_pool(configuration: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(configuration.with_db())
}

async fn run(
    listener: TcpListener,
    db_pool: PgPool,
    email_client: EmailClient,
    hmac_secret: Secret<String>,
    site: SiteSettings,
) -> FdResult<Server> {
    let db_pool = Data::new(db_pool);
    let email_client = Data::new(email_client);
    let site = Data::new(site);
    let secret_key = Key::from(hmac_secret.expose_secret().as_bytes());
    let message_store = CookieMessageStore::builder(secret_key.clone()).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                secret_key.clone(),
            ))
            .wrap(TracingLogger::default())
            .wrap(error_page_handlers())
            .route("/", web::get().to(welcome))
            .route("/sitemap.xml", web::get().to(sitemap))
            .route("/login", web::get().to(login_form))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(log_out))
            .service(
                web::resource("/feedback/")
                    .route(web::get().to(feedback_form))
                    .route(web::post().to(send_feedback)),
            )
            .service(
                web::scope("/profile")
                    .wrap(from_fn(reject_anonymous_users))
                    .service(
                        web::resource("/")
                            .route(web::get().to(profile_form))
                            .route(web::post().to(update_profile)),
                    ),
            )
            .service(
                web::scope("/user")
                    // anonymous check runs first, then the admin check
                    .wrap(from_fn(reject_non_admin_users))
                    .wrap(from_fn(reject_anonymous_users))
                    .service(web::resource("/").route(web::get().to(user_list))),
            )
            // JSON service variants, registered as their own routes
            .service(
                web::scope("/_s")
                    .service(
                        web::scope("/profile")
                            .wrap(from_fn(reject_anonymous_users))
                            .service(
                                web::resource("/")
                                    .route(web::get().to(profile_service))
                                    .route(web::post().to(update_profile_service)),
                            ),
                    )
                    .service(
                        web::scope("/user")
                            .wrap(from_fn(reject_non_admin_users))
                            .wrap(from_fn(reject_anonymous_users))
                            .service(web::resource("/").route(web::get().to(user_list_service))),
                    ),
            )
            .app_data(db_pool.clone())
            .app_data(email_client.clone())
            .app_data(site.clone())
    })
    .listen(listener)
    .context("Failed to listen on the provided socket.")?
    .run();
    Ok(server)
}
