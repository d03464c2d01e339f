//! HTTP transport: URI cache, request construction, dispatch, and raw
//! failure taxonomy.
//!
//! One [`HttpTransport::send`] call issues exactly one request and resolves
//! exactly once with either the parsed JSON body or an [`Error`]. There is
//! no retry here and no ordering guarantee between concurrent sends.

use crate::endpoint::{Endpoint, Verb};
use crate::error::Error;
use crate::Result;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::Duration;
use url::Url;

/// Production API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Extra header required by the stateful assistants resource family.
pub const BETA_HEADER: (&str, &str) = ("OpenAI-Beta", "assistants=v2");

/// Default per-call timeout. Unbounded outstanding requests against a
/// third-party API are a resource leak; a timeout surfaces as a transport
/// failure like any other no-response outcome.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Memoizes parsed endpoint addresses keyed by the literal URL string.
///
/// Population is idempotent and never evicts: the address space is a small
/// fixed set of templated endpoints plus a bounded number of resource-id
/// substitutions, and hot endpoints are resolved on every call.
pub struct UriCache {
    entries: RwLock<HashMap<String, Url>>,
}

impl UriCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Exact-string lookup; a hit returns the cached address without
    /// re-validating.
    pub fn resolve(&self, url: &str) -> Result<Url> {
        if let Some(cached) = self.entries.read().unwrap().get(url) {
            return Ok(cached.clone());
        }
        let parsed = Url::parse(url)
            .map_err(|e| Error::construction(format!("invalid endpoint URL `{url}`: {e}")))?;
        // Two completion threads may race past the read; both parsed the
        // same literal string, so first insert wins and the result is
        // structurally identical either way.
        let mut entries = self.entries.write().unwrap();
        Ok(entries.entry(url.to_string()).or_insert(parsed).clone())
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for UriCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Connection-pooled HTTP client bound to one credential and base URL.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    uris: UriCache,
}

impl HttpTransport {
    /// `base_url` overrides the production origin, primarily for tests
    /// against a mock server.
    pub fn new(api_key: String, base_url: Option<&str>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            api_key,
            uris: UriCache::new(),
        })
    }

    /// Issue one request against a resolved path (query string included)
    /// and parse the body as JSON.
    ///
    /// Headers always carry content-type and bearer authorization; the beta
    /// feature header is added for assistants-family endpoints. GET and
    /// DELETE requests never carry a body.
    pub async fn send(
        &self,
        endpoint: &Endpoint,
        path_and_query: &str,
        body: Option<&Value>,
    ) -> Result<Value> {
        let url = self
            .uris
            .resolve(&format!("{}{}", self.base_url, path_and_query))?;

        let mut request = match endpoint.verb {
            Verb::Get => self.client.get(url),
            Verb::Post => self.client.post(url),
            Verb::Delete => self.client.delete(url),
        };
        request = request
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&self.api_key);
        if endpoint.beta {
            request = request.header(BETA_HEADER.0, BETA_HEADER.1);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| Error::Malformed(e.to_string()))
    }

    pub(crate) fn uri_cache(&self) -> &UriCache {
        &self.uris
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_returns_structurally_equal_addresses() {
        let cache = UriCache::new();
        let first = cache
            .resolve("https://api.openai.com/v1/chat/completions")
            .unwrap();
        let second = cache
            .resolve("https://api.openai.com/v1/chat/completions")
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn cache_hit_does_not_grow_the_cache() {
        let cache = UriCache::new();
        cache.resolve("https://api.openai.com/v1/models").unwrap();
        cache.resolve("https://api.openai.com/v1/models").unwrap();
        assert_eq!(cache.len(), 1);

        cache
            .resolve("https://api.openai.com/v1/threads/th_1")
            .unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn invalid_url_is_a_construction_error() {
        let cache = UriCache::new();
        let err = cache.resolve("not a url").unwrap_err();
        assert!(matches!(err, Error::Construction(_)));
        // A failed parse never populates the cache.
        assert!(cache.is_empty());
    }

    #[test]
    fn cache_is_shareable_across_threads() {
        use std::sync::Arc;

        let cache = Arc::new(UriCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                std::thread::spawn(move || {
                    cache
                        .resolve("https://api.openai.com/v1/vector_stores")
                        .unwrap()
                })
            })
            .collect();

        let urls: Vec<Url> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(urls.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(cache.len(), 1);
    }
}
