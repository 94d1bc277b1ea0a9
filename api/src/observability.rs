use anyhow::Result;
use prometheus::Registry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::metrics;

const DEFAULT_LOG_FILTER: &str = "api=debug,guard=info,tower_http=debug";

pub struct Observability {
    pub registry: Registry,
}

impl Observability {
    /// Install the global subscriber and build the metrics registry.
    /// `LOG_FORMAT=json` switches the fmt layer to JSON lines.
    pub fn init() -> Result<Self> {
        let registry = Registry::new_custom(Some("guard".into()), None)?;
        metrics::register_all(&registry)?;

        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
        let json = std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .try_init()?;
        }

        tracing::info!(json, "Observability stack initialized");
        Ok(Self { registry })
    }
}
