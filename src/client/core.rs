use crate::classify::classify;
use crate::client::builder::ClientBuilder;
use crate::config::ApiConfig;
use crate::credential::CredentialMonitor;
use crate::endpoint::{Endpoint, ListQuery};
use crate::notify::NotifySink;
use crate::payload::{self, ChatMessage};
use crate::transport::{HttpTransport, UriCache};
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info};

/// Client for the OpenAI HTTP API.
///
/// Every endpoint method resolves exactly once, to `Some(parsed JSON)` on
/// success or `None` on any failure; failure detail goes to the tracing
/// stream and, when auth-related, flips the [`CredentialMonitor`] and
/// reaches the notify sink. [`dispatch`](Self::dispatch) exposes the
/// underlying error taxonomy for callers that need it.
///
/// Calls never block the dispatching task beyond awaiting their own future,
/// and two concurrent calls complete independently in any order.
pub struct OpenAiClient {
    pub(crate) config: ApiConfig,
    transport: HttpTransport,
    credential: CredentialMonitor,
    notify: Arc<dyn NotifySink>,
}

impl OpenAiClient {
    /// Start building a client from a resolved configuration.
    pub fn builder(config: ApiConfig) -> ClientBuilder {
        ClientBuilder::new(config)
    }

    pub(crate) fn assemble(
        config: ApiConfig,
        transport: HttpTransport,
        credential: CredentialMonitor,
        notify: Arc<dyn NotifySink>,
    ) -> Self {
        Self {
            config,
            transport,
            credential,
            notify,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Current credential validity state.
    pub fn credential(&self) -> &CredentialMonitor {
        &self.credential
    }

    /// The resolved-address cache, exposed for observability.
    pub fn uri_cache(&self) -> &UriCache {
        self.transport.uri_cache()
    }

    /// Dispatch one endpoint call and surface the full error taxonomy.
    ///
    /// Classification side effects (logging, credential flip, operator
    /// notification) run before the error is returned, so a caller that
    /// drops the error loses nothing operators care about.
    pub async fn dispatch(
        &self,
        endpoint: &Endpoint,
        params: &[(&str, &str)],
        query: Option<&ListQuery>,
        body: Option<Value>,
    ) -> Result<Value> {
        let started = Instant::now();
        let result = self.dispatch_inner(endpoint, params, query, body).await;
        match &result {
            Ok(_) => {
                debug!(
                    method = endpoint.verb.as_str(),
                    endpoint = endpoint.path,
                    duration_ms = started.elapsed().as_millis() as u64,
                    "request ok"
                );
            }
            Err(err) => self.report_failure(endpoint, err).await,
        }
        result
    }

    async fn dispatch_inner(
        &self,
        endpoint: &Endpoint,
        params: &[(&str, &str)],
        query: Option<&ListQuery>,
        body: Option<Value>,
    ) -> Result<Value> {
        let mut path = endpoint.resolve_path(params)?;
        if let Some(query) = query {
            path.push_str(&query.to_query());
        }
        self.transport.send(endpoint, &path, body.as_ref()).await
    }

    /// Absence-contract wrapper used by the endpoint table bindings: any
    /// failure (including one from payload construction) is classified and
    /// collapses to `None`.
    pub(crate) async fn call(
        &self,
        endpoint: &Endpoint,
        params: &[(&str, &str)],
        query: Option<&ListQuery>,
        body: Result<Option<Value>>,
    ) -> Option<Value> {
        match body {
            Ok(body) => self.dispatch(endpoint, params, query, body).await.ok(),
            Err(err) => {
                self.report_failure(endpoint, &err).await;
                None
            }
        }
    }

    /// Classify a failure, log it, and flip/notify when auth-related.
    async fn report_failure(&self, endpoint: &Endpoint, err: &Error) {
        let diagnostic = classify(err);
        error!(
            method = endpoint.verb.as_str(),
            endpoint = endpoint.path,
            auth_related = diagnostic.auth_related,
            "{}",
            diagnostic.message
        );
        if diagnostic.auth_related {
            self.invalidate_credential(&diagnostic.message).await;
        }
    }

    /// Flip validity and emit exactly one operator notification for this
    /// diagnostic. Repeated failures keep notifying; the transition flag
    /// only changes what `mark_invalid` reports.
    pub(crate) async fn invalidate_credential(&self, diagnostic: &str) {
        self.credential.mark_invalid(diagnostic);
        self.notify.notify(diagnostic).await;
    }

    /// Serialize an options struct and fold required fields into the body.
    pub(crate) fn body_from<T: Serialize>(
        &self,
        options: &T,
        required: Vec<(&'static str, Value)>,
    ) -> Result<Option<Value>> {
        let mut map = payload::to_object(options)?;
        for (key, value) in required {
            map.insert(key.to_string(), value);
        }
        Ok(Some(Value::Object(map)))
    }

    /// One-time startup verification of the configured key.
    ///
    /// Skipped (returning `false`) when the key is empty or the shipped
    /// placeholder. Otherwise sends one fixed minimal chat exchange through
    /// the normal pipeline: success restores validity and logs the reply;
    /// any failure flags the key and alerts operators.
    pub async fn verify_key(&self) -> bool {
        if !self.config.has_usable_key() {
            info!("no API key configured; skipping verification");
            return false;
        }

        let messages = [
            ChatMessage::system("This is a test message to verify the API key."),
            ChatMessage::user("If you are there, reply by only saying 'Hello '."),
        ];

        match self.simple_chat(&messages).await {
            Some(response)
                if response["choices"]
                    .as_array()
                    .map_or(false, |choices| !choices.is_empty()) =>
            {
                self.credential.mark_valid();
                let reply = response["choices"][0]["message"]["content"]
                    .as_str()
                    .unwrap_or_default()
                    .trim()
                    .to_string();
                info!(reply = reply.as_str(), "API key verified successfully");
                true
            }
            _ => {
                self.invalidate_credential(
                    "API key verification failed. Please check your API key.",
                )
                .await;
                false
            }
        }
    }
}
