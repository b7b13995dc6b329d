//! jobtrail - personal job-application tracker fed by Gmail.
//!
//! Serves the REST API the dashboard talks to: Gmail authentication,
//! mailbox sync, and CRUD over tracked applications.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

use jobtrail::{config, server};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jobtrail=debug,jobtrail_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = config::Settings::from_env()?;
    info!("Starting jobtrail");

    server::listen(settings).await
}
