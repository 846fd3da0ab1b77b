//! Remote data fetcher with a stale-while-revalidate cache.
//!
//! Documents are fetched with a plain HTTP GET and parsed as JSON. Raw
//! bodies of successfully parsed documents are cached per URL. A cached body
//! younger than the revalidation interval is served directly. An older one
//! is still served, while a single background task refetches it. Failed
//! fetches are never cached and never retried.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Errors that make a source document unavailable.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The source answered with a non-success status.
    #[error("source returned HTTP {status}")]
    Status {
        /// Status code received.
        status: reqwest::StatusCode,
    },

    /// The request could not be sent or the body could not be read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The body is not a valid JSON document of the expected shape.
    #[error("invalid document: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A cached response body.
#[derive(Debug)]
struct CacheEntry {
    body: Arc<[u8]>,
    fetched_at: Instant,
    /// Set while a background refresh for this URL is in flight.
    refreshing: bool,
}

/// Fetches JSON documents, caching successful responses.
///
/// Cloning is cheap and clones share the cache.
#[derive(Debug, Clone)]
pub struct SourceFetcher {
    client: reqwest::Client,
    revalidate: Duration,
    cache: Arc<RwLock<HashMap<String, CacheEntry>>>,
}

impl SourceFetcher {
    /// Creates a fetcher with a per-request `timeout`.
    ///
    /// A `revalidate` of zero disables caching.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Request`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration, revalidate: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("taskboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, revalidate))
    }

    /// Creates a fetcher around an existing client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, revalidate: Duration) -> Self {
        Self {
            client,
            revalidate,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The revalidation interval.
    #[must_use]
    pub const fn revalidate(&self) -> Duration {
        self.revalidate
    }

    /// Fetches and parses the document at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on a non-success status, a transport failure,
    /// or a body that does not parse as `T`.
    pub async fn fetch_document<T>(&self, url: &str) -> Result<T, FetchError>
    where
        T: DeserializeOwned + 'static,
    {
        if self.caching() {
            if let Some(body) = self.cached_body::<T>(url).await {
                return Ok(serde_json::from_slice(&body)?);
            }
        }

        let body = fetch_body(&self.client, url).await?;
        let document = serde_json::from_slice(&body)?;

        if self.caching() {
            let mut cache = self.cache.write().await;
            cache.insert(
                url.to_string(),
                CacheEntry {
                    body,
                    fetched_at: Instant::now(),
                    refreshing: false,
                },
            );
        }
        Ok(document)
    }

    const fn caching(&self) -> bool {
        !self.revalidate.is_zero()
    }

    /// Returns the cached body for `url`, scheduling a refresh if it is stale.
    async fn cached_body<T>(&self, url: &str) -> Option<Arc<[u8]>>
    where
        T: DeserializeOwned + 'static,
    {
        let mut cache = self.cache.write().await;
        let entry = cache.get_mut(url)?;
        if entry.fetched_at.elapsed() >= self.revalidate && !entry.refreshing {
            entry.refreshing = true;
            self.spawn_refresh::<T>(url.to_string());
        }
        Some(Arc::clone(&entry.body))
    }

    /// Refetches `url` in the background, replacing the cached body only if
    /// the new one parses.
    fn spawn_refresh<T>(&self, url: String)
    where
        T: DeserializeOwned + 'static,
    {
        let client = self.client.clone();
        let cache = Arc::clone(&self.cache);
        tokio::spawn(async move {
            let refreshed = match fetch_body(&client, &url).await {
                Ok(body) => match serde_json::from_slice::<T>(&body) {
                    Ok(_) => Some(body),
                    Err(e) => {
                        tracing::warn!(url = %url, error = %e, "refreshed document is invalid, keeping cached copy");
                        None
                    }
                },
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "refresh failed, keeping cached copy");
                    None
                }
            };

            let mut cache = cache.write().await;
            if let Some(entry) = cache.get_mut(&url) {
                entry.refreshing = false;
                if let Some(body) = refreshed {
                    tracing::debug!(url = %url, "cached document refreshed");
                    entry.body = body;
                    entry.fetched_at = Instant::now();
                }
            }
        });
    }
}

/// Issues the GET and returns the body of a successful response.
async fn fetch_body(client: &reqwest::Client, url: &str) -> Result<Arc<[u8]>, FetchError> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status { status });
    }
    let body = response.bytes().await?;
    Ok(Arc::from(body.as_ref()))
}
