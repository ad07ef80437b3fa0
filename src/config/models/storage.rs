//! Document storage configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Which document store backs the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Process-local store, lost on restart
    #[default]
    Memory,
    /// Cloud Firestore over its REST API
    Firestore,
}

impl std::str::FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "firestore" => Ok(Self::Firestore),
            other => Err(format!("Unknown storage backend: {}", other)),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Collection holding the POC document
    #[serde(default = "default_collection")]
    pub collection: String,
    /// ID of the POC document
    #[serde(default = "default_document")]
    pub document: String,
    #[serde(default)]
    pub firestore: FirestoreConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            collection: default_collection(),
            document: default_document(),
            firestore: FirestoreConfig::default(),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.collection.is_empty() || self.collection.contains('/') {
            return Err(format!("Invalid collection name: {:?}", self.collection));
        }
        if self.document.is_empty() || self.document.contains('/') {
            return Err(format!("Invalid document id: {:?}", self.document));
        }
        if self.backend == StorageBackend::Firestore {
            self.firestore.validate()?;
        }
        Ok(())
    }
}

/// Firestore REST API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirestoreConfig {
    /// Google Cloud project; falls back to the Firebase project when empty
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_firestore_database")]
    pub database: String,
    #[serde(default = "default_firestore_base_url")]
    pub base_url: String,
    /// `host:port` of a local emulator; overrides `base_url`
    #[serde(default)]
    pub emulator_host: Option<String>,
    /// OAuth2 access token sent as a bearer credential
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default = "default_firestore_timeout")]
    pub timeout_secs: u64,
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            database: default_firestore_database(),
            base_url: default_firestore_base_url(),
            emulator_host: None,
            access_token: None,
            timeout_secs: default_firestore_timeout(),
        }
    }
}

impl FirestoreConfig {
    /// Root URL requests are issued against
    pub fn endpoint(&self) -> String {
        match &self.emulator_host {
            Some(host) => format!("http://{}", host.trim_end_matches('/')),
            None => self.base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.emulator_host.is_none() && url::Url::parse(&self.base_url).is_err() {
            return Err(format!("Invalid Firestore base URL: {}", self.base_url));
        }
        if self.emulator_host.is_none() && self.access_token.is_none() {
            return Err(
                "Firestore requires an access_token unless emulator_host is set".to_string(),
            );
        }
        if self.timeout_secs == 0 {
            return Err("Firestore timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

fn default_firestore_timeout() -> u64 {
    10
}
