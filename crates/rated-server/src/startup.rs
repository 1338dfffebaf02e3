//! Server startup utilities.

use rated_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(
        r#"
                 __           __
   _________ _  / /____  ____/ /
  / ___/ __ `/ / __/ _ \/ __  /
 / /  / /_/ / / /_/  __/ /_/ /
/_/   \__,_/  \__/\___/\__,_/
    "#
    );
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig) {
    let separator = "=".repeat(60);
    let addr = config.server.rest_addr();
    info!("{}", separator);
    info!("Environment: {}", config.app.environment);
    info!("REST API:    http://{}/api/v1", addr);
    info!("Health:      http://{}/health", addr);
    info!("Cache:       {:?}", config.cache.backend);
    info!(
        "Cache TTLs:  ratings {}s, listings {}s",
        config.cache.rating_ttl_secs, config.cache.listing_ttl_secs
    );
    info!("{}", separator);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_banner_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_banner();
    }

    #[test]
    fn test_print_startup_info_does_not_panic() {
        let _ = tracing_subscriber::fmt::try_init();
        print_startup_info(&AppConfig::default());
    }
}
