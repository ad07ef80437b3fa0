//! Configuration management for the gateway
//!
//! This module handles loading, validation, and management of all gateway configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{GatewayError, Result};
use std::path::Path;
use tracing::{debug, info, warn};

/// Main configuration struct for the gateway
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Gateway configuration
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self {
            gateway: read_gateway_config(path.as_ref()).await?,
        };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut gateway = GatewayConfig::default();
        apply_overrides(&mut gateway, |key| std::env::var(key).ok())?;

        let config = Self { gateway };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: defaults -> file -> environment.
    ///
    /// A `.env` file in the working directory is read first. A missing config
    /// file is not an error; a malformed one is. The result is not validated,
    /// so callers can layer command-line overrides first and then call
    /// [`Config::validate`].
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(env_path) => debug!("Loaded environment from {:?}", env_path),
            Err(e) if e.not_found() => {}
            Err(e) => warn!("Failed to read .env file: {}", e),
        }

        let path = path.as_ref();
        let mut gateway = if tokio::fs::try_exists(path).await.unwrap_or(false) {
            read_gateway_config(path).await?
        } else {
            info!(
                "Configuration file {:?} not found, using defaults and environment",
                path
            );
            GatewayConfig::default()
        };

        apply_overrides(&mut gateway, |key| std::env::var(key).ok())?;

        Ok(Self { gateway })
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get auth configuration
    pub fn auth(&self) -> &AuthConfig {
        &self.gateway.auth
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.gateway.storage
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.gateway.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.gateway
            .server
            .validate()
            .map_err(|e| GatewayError::Config(format!("Server config error: {}", e)))?;

        self.gateway
            .auth
            .validate()
            .map_err(|e| GatewayError::Config(format!("Auth config error: {}", e)))?;

        self.gateway
            .storage
            .validate()
            .map_err(|e| GatewayError::Config(format!("Storage config error: {}", e)))?;

        crate::config::models::auth::warn_insecure_config(&self.gateway.auth);

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.gateway)
            .map_err(|e| GatewayError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

async fn read_gateway_config(path: &Path) -> Result<GatewayConfig> {
    info!("Loading configuration from: {:?}", path);

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| GatewayError::Config(format!("Failed to read config file: {}", e)))?;

    serde_yaml::from_str(&content)
        .map_err(|e| GatewayError::Config(format!("Failed to parse config: {}", e)))
}

/// Apply environment overrides through `lookup`.
pub fn apply_overrides<F>(config: &mut GatewayConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(host) = get("FIREGATE_HOST") {
        config.server.host = host;
    }
    if let Some(port) = get("FIREGATE_PORT").or_else(|| get("PORT")) {
        config.server.port = port
            .trim()
            .parse()
            .map_err(|e| GatewayError::Config(format!("Invalid port {:?}: {}", port, e)))?;
    }
    if let Some(origins) = get("FIREGATE_ALLOWED_ORIGINS") {
        config.server.cors.allowed_origins = origins
            .split(',')
            .map(|o| o.trim().to_string())
            .filter(|o| !o.is_empty())
            .collect();
    }

    if let Some(project) = get("FIREBASE_PROJECT_ID") {
        config.auth.firebase_project_id = project;
    }
    if let Some(url) = get("FIREBASE_JWKS_URL") {
        config.auth.jwks_url = url;
    }
    if let Some(policy) = get("FIREGATE_TOKEN_FAILURE_POLICY") {
        config.auth.token_failure_policy = policy.parse().map_err(GatewayError::Config)?;
    }

    if let Some(backend) = get("FIREGATE_STORAGE_BACKEND") {
        config.storage.backend = backend.parse().map_err(GatewayError::Config)?;
    }
    if let Some(host) = get("FIRESTORE_EMULATOR_HOST") {
        config.storage.firestore.emulator_host = Some(host);
    }
    if let Some(token) = get("FIRESTORE_ACCESS_TOKEN") {
        config.storage.firestore.access_token = Some(token);
    }

    if let Some(json) = get("FIREGATE_LOG_JSON") {
        config.logging.json = matches!(json.trim(), "1" | "true" | "yes");
    }

    Ok(())
}
