use anyhow::Result;
use prometheus::Registry;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LogFormat;
use crate::metrics;

pub struct Observability {
    pub registry: Registry,
}

impl Observability {
    pub fn init(format: LogFormat) -> Result<Self> {
        let registry = build_registry()?;

        let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "api=debug,tower_http=info".into());

        let (text_layer, json_layer) = match format {
            LogFormat::Text => (Some(tracing_subscriber::fmt::layer()), None),
            LogFormat::Json => (None, Some(tracing_subscriber::fmt::layer().json())),
        };

        tracing_subscriber::registry()
            .with(env_filter)
            .with(text_layer)
            .with(json_layer)
            .try_init()?;

        tracing::info!(?format, "Observability stack initialized (Prometheus + tracing)");
        Ok(Self { registry })
    }
}

/// Registry with every service metric registered under the `application` prefix
pub fn build_registry() -> prometheus::Result<Registry> {
    let registry = Registry::new_custom(Some("application".into()), None)?;
    metrics::register_all(&registry)?;
    Ok(registry)
}
