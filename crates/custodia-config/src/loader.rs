//! Configuration loader with layered sources.

use crate::AppConfig;
use config::{Config, Environment, File};
use custodia_core::CustodiaError;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: String,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides (not committed)
    /// 4. Environment variables with `CUSTODIA__` prefix
    pub fn new(config_dir: impl Into<String>) -> Result<Self, CustodiaError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, CustodiaError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), CustodiaError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    /// Loads configuration from the specified directory.
    fn load_config(config_dir: &str) -> Result<AppConfig, CustodiaError> {
        // Load .env file if present
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment =
            std::env::var("CUSTODIA_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder();

        // 1. Load default configuration
        let default_path = format!("{}/default.toml", config_dir);
        if Path::new(&default_path).exists() {
            debug!("Loading default config from: {}", default_path);
            builder = builder.add_source(File::with_name(&default_path).required(false));
        }

        // 2. Load environment-specific configuration
        let env_path = format!("{}/{}.toml", config_dir, environment);
        if Path::new(&env_path).exists() {
            debug!("Loading environment config from: {}", env_path);
            builder = builder.add_source(File::with_name(&env_path).required(false));
        }

        // 3. Load local overrides (not committed to version control)
        let local_path = format!("{}/local.toml", config_dir);
        if Path::new(&local_path).exists() {
            debug!("Loading local config from: {}", local_path);
            builder = builder.add_source(File::with_name(&local_path).required(false));
        }

        // 4. Override with environment variables (CUSTODIA_ prefix)
        builder = builder.add_source(
            Environment::with_prefix("CUSTODIA")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| CustodiaError::Configuration(e.to_string()))?;

        let app_config: AppConfig = config
            .try_deserialize()
            .map_err(|e| CustodiaError::Configuration(e.to_string()))?;

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Validates critical configuration values.
    fn validate_config(config: &AppConfig) -> Result<(), CustodiaError> {
        if config.database.url.is_empty() {
            return Err(CustodiaError::Configuration(
                "database.url must not be empty".to_string(),
            ));
        }

        if config.database.min_connections > config.database.max_connections {
            return Err(CustodiaError::Configuration(format!(
                "database.min_connections ({}) exceeds database.max_connections ({})",
                config.database.min_connections, config.database.max_connections
            )));
        }

        Ok(())
    }
}

impl std::fmt::Debug for ConfigLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigLoader")
            .field("config_dir", &self.config_dir)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_from_missing_directory_yields_defaults() {
        let loader = ConfigLoader::new("/nonexistent/config/dir").unwrap();
        let config = loader.get().await;
        assert_eq!(config.app.name, "custodia");
        assert_eq!(config.database.max_connections, 5);
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "[database]\nurl = \"sqlite://test.db\"\nmin_connections = 2\nmax_connections = 10\nconnect_timeout_secs = 5\nidle_timeout_secs = 60\nlog_queries = true"
        )
        .unwrap();

        let loader = ConfigLoader::new(dir.path().to_str().unwrap()).unwrap();
        let config = loader.get().await;
        assert_eq!(config.database.url, "sqlite://test.db");
        assert_eq!(config.database.max_connections, 10);
        assert!(config.database.log_queries);
    }

    #[tokio::test]
    async fn test_reload_picks_up_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.toml");
        std::fs::write(&path, "[database]\nurl = \"sqlite://a.db\"\n").unwrap();

        let loader = ConfigLoader::new(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(loader.get().await.database.url, "sqlite://a.db");

        std::fs::write(&path, "[database]\nurl = \"sqlite://b.db\"\n").unwrap();
        loader.reload().await.unwrap();
        assert_eq!(loader.get().await.database.url, "sqlite://b.db");
    }

    #[tokio::test]
    async fn test_env_var_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.toml");
        std::fs::write(&path, "[database]\nconnect_timeout_secs = 30\n").unwrap();

        // connect_timeout_secs is asserted by no other test, so the
        // process-global variable cannot race a parallel test.
        std::env::set_var("CUSTODIA__DATABASE__CONNECT_TIMEOUT_SECS", "7");
        let loader = ConfigLoader::new(dir.path().to_str().unwrap());
        std::env::remove_var("CUSTODIA__DATABASE__CONNECT_TIMEOUT_SECS");

        let config = loader.unwrap().get().await;
        assert_eq!(config.database.connect_timeout_secs, 7);
    }

    #[tokio::test]
    async fn test_invalid_pool_bounds_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.toml");
        std::fs::write(
            &path,
            "[database]\nmin_connections = 10\nmax_connections = 2\n",
        )
        .unwrap();

        let result = ConfigLoader::new(dir.path().to_str().unwrap());
        assert!(result.is_err());
    }
}
