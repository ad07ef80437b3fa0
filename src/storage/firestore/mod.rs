//! Cloud Firestore backend over the REST API

pub mod value;


use crate::config::FirestoreConfig;
use crate::storage::Document;
use crate::utils::error::{GatewayError, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Credential the emulator accepts in place of an OAuth token
const EMULATOR_TOKEN: &str = "owner";

/// Firestore document as returned by the REST API
#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    fields: serde_json::Map<String, serde_json::Value>,
}

/// Firestore REST client bound to one project and database
#[derive(Debug, Clone)]
pub struct FirestoreStore {
    client: reqwest::Client,
    endpoint: Url,
    project_id: String,
    database: String,
    access_token: Option<String>,
}

impl FirestoreStore {
    pub fn new(config: &FirestoreConfig, fallback_project: &str) -> Result<Self> {
        let project_id = if config.project_id.is_empty() {
            fallback_project.to_string()
        } else {
            config.project_id.clone()
        };
        if project_id.is_empty() {
            return Err(GatewayError::config(
                "Firestore backend requires a project ID",
            ));
        }

        let endpoint = Url::parse(&config.endpoint())?;

        let access_token = match (&config.access_token, &config.emulator_host) {
            (Some(token), _) => Some(token.clone()),
            (None, Some(_)) => Some(EMULATOR_TOKEN.to_string()),
            (None, None) => None,
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GatewayError::config(format!("Failed to build HTTP client: {}", e)))?;

        info!(
            project = %project_id,
            database = %config.database,
            endpoint = %endpoint,
            "Firestore store configured"
        );

        Ok(Self {
            client,
            endpoint,
            project_id,
            database: config.database.clone(),
            access_token,
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// URL of `collection/id`
    fn document_url(&self, collection: &str, id: &str) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::config("Firestore endpoint cannot be a base URL"))?
            .pop_if_empty()
            .extend([
                "v1",
                "projects",
                self.project_id.as_str(),
                "databases",
                self.database.as_str(),
                "documents",
                collection,
                id,
            ]);
        Ok(url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>> {
        let url = self.document_url(collection, id)?;
        debug!("Firestore GET {}", url);

        let response = self.authorize(self.client.get(url)).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let raw: RawDocument = response.json().await?;
                Ok(Some(value::decode_fields(&raw.fields)))
            }
            status => Err(Self::failure("read", status, response).await),
        }
    }

    /// Merge `fields` into the document; the update mask limits the write to
    /// the named top-level fields.
    pub async fn merge(&self, collection: &str, id: &str, fields: Document) -> Result<()> {
        let url = self.document_url(collection, id)?;
        debug!("Firestore PATCH {} ({} fields)", url, fields.len());

        let mask: Vec<(&str, String)> = fields
            .keys()
            .map(|name| ("updateMask.fieldPaths", value::quote_field_path(name)))
            .collect();
        let body = serde_json::json!({ "fields": value::encode_fields(&fields) });

        let response = self
            .authorize(self.client.patch(url).query(&mask).json(&body))
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::failure("write", status, response).await)
        }
    }

    async fn failure(op: &str, status: StatusCode, response: reqwest::Response) -> GatewayError {
        let body = response.text().await.unwrap_or_default();
        GatewayError::storage(format!(
            "Firestore {} failed with {}: {}",
            op,
            status,
            crate::utils::truncate_string(&body, 200)
        ))
    }
}
