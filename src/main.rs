use std::error::Error;

use ai_llm_service::telemetry;
use tracing::{Level, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // A missing .env is fine; the process environment may already be set.
    let dotenv = dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_levels(
            telemetry::DEFAULT_FILTER,
            &[("hyper", Level::WARN)],
        ))
        .with(telemetry::layer())
        .init();

    if let Some(path) = dotenv {
        info!(path = %path.display(), "loaded .env");
    }

    api::start().await?;

    Ok(())
}
