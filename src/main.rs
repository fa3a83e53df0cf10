//! main.rs

use anyhow::Context;
use frontdesk::configuration::get_configuration;
use frontdesk::error::FdResult;
use frontdesk::startup::Application;
use frontdesk::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> FdResult<()> {
    let subscriber = get_subscriber("frontdesk".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    // Panic if we can't read configuration
    let configuration = get_configuration().expect("Failed to read configuration.");
    let application = Application::build(configuration).await?;
    tracing::info!("Listening on port {}", application.port());
    application
        .run_until_stopped()
        .await
        .context("The server loop failed.")?;

    Ok(())
}
