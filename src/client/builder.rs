use crate::client::core::OpenAiClient;
use crate::config::ApiConfig;
use crate::credential::CredentialMonitor;
use crate::notify::{noop_sink, NotifySink};
use crate::transport::{HttpTransport, DEFAULT_TIMEOUT};
use crate::Result;
use std::sync::Arc;
use std::time::Duration;

/// Builder for [`OpenAiClient`].
///
/// Keep this surface small and predictable: a resolved config, an optional
/// notify sink, an optional timeout, and a base-URL override for tests.
pub struct ClientBuilder {
    config: ApiConfig,
    notify: Arc<dyn NotifySink>,
    timeout: Duration,
    /// Override base URL (primarily for testing with mock servers).
    base_url_override: Option<String>,
}

impl ClientBuilder {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            notify: noop_sink(),
            timeout: DEFAULT_TIMEOUT,
            base_url_override: None,
        }
    }

    /// Inject the notify-operators sink. Default is a no-op sink.
    pub fn notify_sink(mut self, sink: Arc<dyn NotifySink>) -> Self {
        self.notify = sink;
        self
    }

    /// Per-call timeout. A timed-out call surfaces as a transport failure.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the API origin.
    ///
    /// This is primarily for testing with mock servers; production traffic
    /// uses the stock origin.
    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.base_url_override = Some(base_url.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<OpenAiClient> {
        let transport = HttpTransport::new(
            self.config.api_key.clone(),
            self.base_url_override.as_deref(),
            self.timeout,
        )?;
        Ok(OpenAiClient::assemble(
            self.config,
            transport,
            CredentialMonitor::new(),
            self.notify,
        ))
    }
}
