use anyhow::Result;
use dotenv::dotenv;
use guard::PayloadValidator;

use api::config::GuardConfig;
use api::observability::Observability;
use api::routes;
use api::state::{AppState, GuardState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    let obs = Observability::init()?;
    let config = GuardConfig::from_env()?;

    // Patterns are compiled here so a broken rule stops startup
    let validator = PayloadValidator::shared()?;

    let state = AppState::new(obs.registry);
    let guard = GuardState::new(validator, config.max_body_bytes);
    let app = routes::app(state, guard);

    tracing::info!("API server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
