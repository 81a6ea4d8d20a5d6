//! Server startup utilities.

use recall_config::ObservabilityConfig;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Prints the startup banner.
pub fn print_banner() {
    info!(r#"
    ____                  ____
   / __ \___  _________ _/ / /
  / /_/ / _ \/ ___/ __ `/ / /
 / _, _/  __/ /__/ /_/ / / /
/_/ |_|\___/\___/\__,_/_/_/
    "#);
}

/// Prints server startup information.
pub fn print_startup_info(rest_addr: &str, cache_enabled: bool) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://{}/api/v1", rest_addr);
    info!("Health:    http://{}/health", rest_addr);
    info!("API Docs:  http://{}/swagger-ui", rest_addr);
    info!("Cache:     {}", if cache_enabled { "redis" } else { "disabled" });
    info!("{}", separator);
}

/// Directives used when `RUST_LOG` is unset.
///
/// Recall and tower-http targets log at debug unless the configured level is
/// quieter than info or already more verbose.
#[must_use]
pub fn default_directives(log_level: &str) -> String {
    match log_level.to_ascii_lowercase().as_str() {
        level @ ("trace" | "warn" | "error") => level.to_string(),
        level => format!("{level},recall=debug,tower_http=debug"),
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(&config.log_level)));

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_json() {
        registry
            .with(fmt::layer().json().with_target(true))
            .init();
    } else {
        registry.with(fmt::layer().with_target(true)).init();
    }
}
