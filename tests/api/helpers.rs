//! tests/api/helpers.rs

use anyhow::Error;
use argon2::password_hash::SaltString;
use argon2::{Algorithm, Argon2, Params, PasswordHasher, Version};
use async_once_cell::OnceCell;
use chrono::{DateTime, Utc};
use frontdesk::configuration::{get_configuration, DatabaseSettings, Settings};
use frontdesk::startup::{get_connection_pool, Application};
use frontdesk::telemetry::{get_subscriber, init_subscriber};
use lazy_static::lazy_static;
use once_cell::sync::Lazy;
use sqlx::{Connection, Executor, PgConnection, PgPool, Row};
use uuid::Uuid;
use wiremock::MockServer;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    // We cannot assign the output of `get_subscriber` to a variable based on the
    // value TEST_LOG` because the sink is part of the type returned by
    // `get_subscriber`, therefore they are not the same type. We could work around
    // it, but this is the most straight-forward way of moving forward.
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

lazy_static! {
    static ref CLEANUP_DB: OnceCell<Result<(), Error>> = OnceCell::new();
}

pub struct TestUser {
    pub user_id: Uuid,
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: Option<String>,
    pub locale: String,
}

impl TestUser {
    pub fn generate() -> Self {
        Self {
            user_id: Uuid::new_v4(),
            username: Uuid::new_v4().to_string(),
            password: Uuid::new_v4().to_string(),
            name: "Test User".to_string(),
            email: Some(format!("{}@domain.com", Uuid::new_v4())),
            locale: "en".to_string(),
        }
    }

    async fn store(&self, pool: &PgPool) {
        let salt = SaltString::generate(&mut rand::thread_rng());
        // We don't care about the exact Argon2 parameters here
        // given that it's for testing purposes!
        let password_hash = Argon2::new(
            Algorithm::Argon2id,
            Version::V0x13,
            Params::new(15_000, 2, 1, None).unwrap(),
        )
        .hash_password(self.password.as_bytes(), &salt)
        .unwrap()
        .to_string();
        sqlx::query(
            "INSERT INTO users (user_id, username, password_hash, name, email, locale, admin, created)
            VALUES ($1, $2, $3, $4, $5, $6, FALSE, $7)",
        )
        .bind(self.user_id)
        .bind(&self.username)
        .bind(password_hash)
        .bind(&self.name)
        .bind(&self.email)
        .bind(&self.locale)
        .bind(Utc::now())
        .execute(pool)
        .await
        .expect("Failed to create test user.");
    }

    pub async fn login(&self, app: &TestApp) -> reqwest::Response {
        app.post_login(&serde_json::json!({
            "username": &self.username,
            "password": &self.password
        }))
        .await
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db_pool: PgPool,
    pub email_server: MockServer,
    pub test_user: TestUser,
    pub api_client: reqwest::Client,
    pub db_name: String,
}

impl TestApp {
    /// helper for sending a POST /login request
    pub async fn post_login<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(&format!("{}/login", &self.address))
            // This 'reqwest' method makes sure that the body is URL-encoded
            // and the 'Content-Type' header is set accordingly.
            .form(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// log the default test user in, asserting success
    pub async fn login_test_user(&self) {
        let response = self.test_user.login(self).await;
        assert_is_redirect_to(&response, "/profile/");
    }

    /// flip the admin flag of the default test user
    pub async fn promote_test_user_to_admin(&self) {
        sqlx::query("UPDATE users SET admin = TRUE WHERE user_id = $1")
            .bind(self.test_user.user_id)
            .execute(&self.db_pool)
            .await
            .expect("Failed to promote test user.");
    }

    /// insert an additional user row directly into the database
    pub async fn seed_user(&self, name: &str, admin: bool, created: DateTime<Utc>) -> Uuid {
        let user_id = Uuid::new_v4();
        sqlx::query(
            "INSERT INTO users (user_id, username, password_hash, name, email, locale, admin, created)
            VALUES ($1, $2, 'invalid-hash', $3, NULL, 'en', $4, $5)",
        )
        .bind(user_id)
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(admin)
        .bind(created)
        .execute(&self.db_pool)
        .await
        .expect("Failed to seed user.");
        user_id
    }

    /// helper to get Response from url
    pub async fn get_response_from_url(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// helper to get the profile form
    pub async fn get_profile(&self) -> reqwest::Response {
        self.get_response_from_url("/profile/").await
    }

    /// helper to get the profile form html
    pub async fn get_profile_html(&self) -> String {
        self.get_profile().await.text().await.unwrap()
    }

    /// helper to post a profile update
    pub async fn post_profile<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(&format!("{}/profile/", &self.address))
            .form(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// helper to get the profile entity as JSON
    pub async fn get_profile_service(&self) -> reqwest::Response {
        self.get_response_from_url("/_s/profile/").await
    }

    /// helper to post a profile update on the service route
    pub async fn post_profile_service<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(&format!("{}/_s/profile/", &self.address))
            .form(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// helper to get the feedback form
    pub async fn get_feedback(&self) -> reqwest::Response {
        self.get_response_from_url("/feedback/").await
    }

    /// helper to post a feedback submission
    pub async fn post_feedback<Body>(&self, body: &Body) -> reqwest::Response
    where
        Body: serde::Serialize,
    {
        self.api_client
            .post(&format!("{}/feedback/", &self.address))
            .form(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// helper to get the user list html page
    pub async fn get_user_list(&self, query: &str) -> reqwest::Response {
        self.get_response_from_url(&format!("/user/{}", query)).await
    }

    /// helper to get the user list as JSON
    pub async fn get_user_list_service(&self, query: &str) -> reqwest::Response {
        self.get_response_from_url(&format!("/_s/user/{}", query))
            .await
    }

    /// fetch a user row for assertions
    pub async fn stored_user(&self, user_id: Uuid) -> (String, Option<String>, String) {
        let row = sqlx::query("SELECT name, email, locale FROM users WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.db_pool)
            .await
            .expect("Failed to fetch stored user.");
        (row.get("name"), row.get("email"), row.get("locale"))
    }
}

// Little helper function to assert redirected location
pub fn assert_is_redirect_to(response: &reqwest::Response, location: &str) {
    assert_eq!(response.status().as_u16(), 303);
    assert_eq!(response.headers().get("Location").unwrap(), location);
}

/// Spin up an instance of our application with default settings.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Spin up an instance of our application
/// and returns its address (i.e. http://localhost:XXXX)
pub async fn spawn_app_with(customize: impl FnOnce(&mut Settings)) -> TestApp {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);
    if let Err(r) = CLEANUP_DB.get_or_init(cleanup_db()).await {
        panic!("clean up of test databases failed:\n{}", r);
    }

    // Launch a mock server to stand in for the email API
    let email_server = MockServer::start().await;

    // Randomise configuration to ensure test isolation
    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        // use different database for each test case
        c.database.database_name = Uuid::new_v4().to_string();
        // use a random OS port
        c.application.port = 0;
        // use the mock server as email API
        c.emailclient.base_url = email_server.uri();
        customize(&mut c);
        c
    };

    // Create and migrate the database
    configure_database(&configuration.database).await;

    let application = Application::build(configuration.clone())
        .await
        .expect("Failed to build application");
    let application_port = application.port();
    let _ = tokio::spawn(application.run_until_stopped());

    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .cookie_store(true)
        .build()
        .unwrap();

    let test_app = TestApp {
        address: format!("http://127.0.0.1:{}", application_port),
        port: application_port,
        db_pool: get_connection_pool(&configuration.database),
        email_server,
        test_user: TestUser::generate(),
        api_client: client,
        db_name: configuration.database.database_name,
    };
    test_app.test_user.store(&test_app.db_pool).await;
    test_app
}

async fn configure_database(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect_with(&config.without_db())
        .await
        .expect("Failed to connect to Postgres");

    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.database_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect_with(config.with_db())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database.");

    connection_pool
}

async fn cleanup_db() -> Result<(), Error> {
    let database = get_configuration()?.database;
    // Connect to postgres without db
    let mut connection = PgConnection::connect_with(&database.without_db()).await?;

    let rows = connection
        .fetch_all("SELECT datname FROM pg_database WHERE datistemplate = false")
        .await?;

    for row in rows {
        let database_name: String = row.try_get("datname")?;
        if Uuid::parse_str(&database_name).is_ok() {
            // database is Uuid -> test database -> delete it
            let query: &str = &format!(r#"DROP DATABASE IF EXISTS "{}" ( FORCE ) "#, database_name);
            connection.execute(query).await?;
        }
    }
    Ok(())
}
