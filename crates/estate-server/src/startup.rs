//! Server startup output.

use estate_config::AppConfig;
use tracing::info;

/// Prints the startup banner.
pub fn print_banner() {
    info!(
        r"
    ______      __        __
   / ____/_____/ /_____ _/ /____
  / __/ / ___/ __/ __ `/ __/ _ \
 / /___(__  ) /_/ /_/ / /_/  __/
/_____/____/\__/\__,_/\__/\___/   Cloud v{}
",
        env!("CARGO_PKG_VERSION")
    );
}

/// Lines describing where the server listens and what it runs on.
#[must_use]
pub fn startup_lines(config: &AppConfig, cache_backend: &str) -> Vec<String> {
    let base = format!("http://{}", config.server.addr());
    let store = if config.database.is_memory() {
        "memory"
    } else {
        "mysql"
    };

    vec![
        format!("Environment: {}", config.app.environment),
        format!("REST API:    {base}/api"),
        format!("Health:      {base}/health"),
        format!("Store:       {store}"),
        format!(
            "Cache:       {cache_backend} (ttl {}s)",
            config.cache.ttl_secs
        ),
    ]
}

/// Prints server startup information.
pub fn print_startup_info(config: &AppConfig, cache_backend: &str) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    for line in startup_lines(config, cache_backend) {
        info!("{}", line);
    }
    info!("{}", separator);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startup_lines_default_config() {
        let lines = startup_lines(&AppConfig::default(), "redis");

        assert!(lines.iter().any(|l| l.ends_with("/api") && l.contains(":8080")));
        assert!(lines.iter().any(|l| l == "Store:       mysql"));
        assert!(lines.iter().any(|l| l == "Cache:       redis (ttl 1800s)"));
    }

    #[test]
    fn test_startup_lines_memory_store() {
        let mut config = AppConfig::default();
        config.database.url = "memory:".to_string();

        let lines = startup_lines(&config, "memory");
        assert!(lines.contains(&"Store:       memory".to_string()));
    }

    #[test]
    fn test_print_does_not_panic() {
        print_banner();
        print_startup_info(&AppConfig::default(), "disabled");
    }
}
