//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator};
use config::{Config, ConfigError, Environment, File};
use estate_core::EstateError;
use std::path::Path;
use tracing::{debug, info, warn};

/// Environment variable naming the active environment profile.
pub const ENVIRONMENT_VAR: &str = "ESTATE_ENVIRONMENT";

/// Configuration loaded once at startup from layered sources.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
    environment: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order, later ones
    /// overriding earlier ones:
    /// 1. `{config_dir}/default.toml`
    /// 2. `{config_dir}/{environment}.toml`
    /// 3. `{config_dir}/local.toml` (not committed to version control)
    /// 4. Environment variables such as `ESTATE__DATABASE__URL`
    ///
    /// The environment profile is read from `ESTATE_ENVIRONMENT` and
    /// defaults to `development`. A `.env` file is loaded first if present.
    pub fn new(config_dir: impl Into<String>) -> Result<Self, EstateError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }
        let environment =
            std::env::var(ENVIRONMENT_VAR).unwrap_or_else(|_| "development".to_string());
        Self::with_environment(config_dir, environment)
    }

    /// Creates a loader for an explicit environment profile.
    pub fn with_environment(
        config_dir: impl Into<String>,
        environment: impl Into<String>,
    ) -> Result<Self, EstateError> {
        let config_dir: String = config_dir.into();
        let environment = environment.into();
        let config = Self::load_config(&config_dir, &environment)?;

        Ok(Self {
            config,
            environment,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, EstateError> {
        Self::new("./config")
    }

    /// Consumes the loader, returning the configuration.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    /// The environment profile the configuration was loaded for.
    #[must_use]
    pub fn environment(&self) -> &str {
        &self.environment
    }

    fn load_config(config_dir: &str, environment: &str) -> Result<AppConfig, EstateError> {
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        for name in ["default", environment, "local"] {
            let path = format!("{config_dir}/{name}.toml");
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("ESTATE")
                .separator("__")
                .try_parsing(true),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(config_error_to_estate_error)?;

        ConfigValidator::validate(&app_config)
            .map_err(|errors| EstateError::Configuration(format_validation_errors(&errors)))?;

        if app_config.app.environment == "production" && app_config.database.is_memory() {
            warn!("In-memory store selected in production; data will not survive a restart");
        }

        Ok(app_config)
    }
}

fn config_error_to_estate_error(err: ConfigError) -> EstateError {
    EstateError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CacheBackend;
    use std::fs;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    #[test]
    fn test_missing_directory_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loader =
            ConfigLoader::with_environment(dir.path().to_string_lossy(), "test").unwrap();
        let config = loader.into_config();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cache.ttl_secs, 1800);
    }

    #[test]
    fn test_layers_override_in_order() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "default.toml",
            "[server]\nport = 9000\n[cache]\nttl_secs = 60\n",
        );
        write(dir.path(), "staging.toml", "[cache]\nttl_secs = 120\n");
        write(dir.path(), "local.toml", "[cache]\nbackend = \"memory\"\n");

        let loader =
            ConfigLoader::with_environment(dir.path().to_string_lossy(), "staging").unwrap();
        let config = loader.into_config();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.cache.ttl_secs, 120);
        assert_eq!(config.cache.backend, CacheBackend::Memory);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "default.toml", "[cache]\nttl_secs = 0\n");

        let err = ConfigLoader::with_environment(dir.path().to_string_lossy(), "test")
            .err()
            .unwrap();
        assert!(matches!(err, EstateError::Configuration(msg) if msg.contains("cache.ttl_secs")));
    }

    #[test]
    fn test_environment_profile_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "test.toml", "[app]\nenvironment = \"test\"\n");

        let loader =
            ConfigLoader::with_environment(dir.path().to_string_lossy(), "test").unwrap();
        assert_eq!(loader.environment(), "test");
        assert_eq!(loader.into_config().app.environment, "test");
    }
}
