//! Signing key cache backed by a JWK set

use crate::auth::verifier::VerificationError;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::jwk::JwkSet;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Used when the key endpoint sends no usable `Cache-Control: max-age`.
const DEFAULT_KEY_TTL: Duration = Duration::from_secs(3600);

/// Minimum spacing between refreshes triggered by an unknown `kid`.
const MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

struct CachedKeys {
    keys: HashMap<String, DecodingKey>,
    fetched_at: Instant,
    expires_at: Option<Instant>,
}

impl CachedKeys {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|t| now >= t)
    }
}

enum KeySource {
    Remote { client: reqwest::Client, url: String },
    Static,
}

/// Decoding keys indexed by key ID.
///
/// Remote stores fetch the JWK set lazily, honour the response's `max-age`,
/// and refetch early (rate limited) when a token names an unknown key.
pub struct KeyStore {
    source: KeySource,
    cache: RwLock<Option<CachedKeys>>,
    refresh_lock: tokio::sync::Mutex<()>,
}

impl std::fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let source = match &self.source {
            KeySource::Remote { url, .. } => url.as_str(),
            KeySource::Static => "static",
        };
        f.debug_struct("KeyStore")
            .field("source", &source)
            .field("cached_keys", &self.key_count())
            .finish()
    }
}

impl KeyStore {
    /// Keys fetched from `url` on demand
    pub fn remote(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            source: KeySource::Remote {
                client,
                url: url.into(),
            },
            cache: RwLock::new(None),
            refresh_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// A fixed key set that never expires
    pub fn from_keys(keys: HashMap<String, DecodingKey>) -> Self {
        Self {
            source: KeySource::Static,
            cache: RwLock::new(Some(CachedKeys {
                keys,
                fetched_at: Instant::now(),
                expires_at: None,
            })),
            refresh_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// A fixed key set parsed from a JWK set document
    pub fn from_jwk_set(set: &JwkSet) -> Self {
        Self::from_keys(decode_jwk_set(set))
    }

    /// Number of keys currently cached
    pub fn key_count(&self) -> usize {
        self.cache.read().as_ref().map_or(0, |c| c.keys.len())
    }

    /// Look up the decoding key for `kid`
    pub async fn get(&self, kid: &str) -> Result<DecodingKey, VerificationError> {
        if let Some(key) = self.cached(kid) {
            return Ok(key);
        }

        let (client, url) = match &self.source {
            KeySource::Static => {
                return Err(VerificationError::failed(format!(
                    "unknown signing key: {}",
                    kid
                )));
            }
            KeySource::Remote { client, url } => (client, url),
        };

        let _guard = self.refresh_lock.lock().await;

        // Another task may have refreshed while we waited.
        if let Some(key) = self.cached(kid) {
            return Ok(key);
        }

        if !self.refresh_due() {
            return Err(VerificationError::failed(format!(
                "unknown signing key: {}",
                kid
            )));
        }

        let fresh = fetch_keys(client, url).await?;
        let key = fresh.keys.get(kid).cloned();
        *self.cache.write() = Some(fresh);

        key.ok_or_else(|| VerificationError::failed(format!("unknown signing key: {}", kid)))
    }

    fn cached(&self, kid: &str) -> Option<DecodingKey> {
        let now = Instant::now();
        self.cache
            .read()
            .as_ref()
            .filter(|c| !c.is_expired(now))
            .and_then(|c| c.keys.get(kid).cloned())
    }

    /// A fetch is due when nothing is cached, the cache expired, or the last
    /// fetch is old enough that an unknown `kid` may be a rotated key.
    fn refresh_due(&self) -> bool {
        let now = Instant::now();
        match self.cache.read().as_ref() {
            None => true,
            Some(c) => c.is_expired(now) || now.duration_since(c.fetched_at) >= MIN_REFRESH_INTERVAL,
        }
    }
}

async fn fetch_keys(client: &reqwest::Client, url: &str) -> Result<CachedKeys, VerificationError> {
    debug!("Fetching signing keys from {}", url);

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| VerificationError::unavailable(format!("key fetch failed: {}", e)))?;

    if !response.status().is_success() {
        return Err(VerificationError::unavailable(format!(
            "key endpoint returned {}",
            response.status()
        )));
    }

    let ttl = response
        .headers()
        .get(reqwest::header::CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_max_age)
        .unwrap_or(DEFAULT_KEY_TTL);

    let set: JwkSet = response
        .json()
        .await
        .map_err(|e| VerificationError::unavailable(format!("invalid key set: {}", e)))?;

    let keys = decode_jwk_set(&set);
    if keys.is_empty() {
        return Err(VerificationError::unavailable("key set contains no usable keys"));
    }

    info!(keys = keys.len(), ttl_secs = ttl.as_secs(), "Refreshed signing keys");

    let now = Instant::now();
    Ok(CachedKeys {
        keys,
        fetched_at: now,
        expires_at: Some(now + ttl),
    })
}

fn decode_jwk_set(set: &JwkSet) -> HashMap<String, DecodingKey> {
    set.keys
        .iter()
        .filter_map(|jwk| {
            let kid = jwk.common.key_id.clone()?;
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => Some((kid, key)),
                Err(e) => {
                    warn!(kid = %kid, "Skipping unusable JWK: {}", e);
                    None
                }
            }
        })
        .collect()
}

/// Extract `max-age` from a `Cache-Control` header value
pub(super) fn parse_max_age(value: &str) -> Option<Duration> {
    value.split(',').find_map(|directive| {
        let (name, secs) = directive.trim().split_once('=')?;
        if name.trim().eq_ignore_ascii_case("max-age") {
            secs.trim().trim_matches('"').parse().ok().map(Duration::from_secs)
        } else {
            None
        }
    })
}
