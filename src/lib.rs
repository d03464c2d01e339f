//! Asynchronous client for the OpenAI HTTP API.
//!
//! The crate is organized around one shared dispatch pipeline: a static
//! endpoint table ([`endpoint`]) describes every remote operation as a
//! (verb, path template) pair, payload construction ([`payload`]) omits
//! unset optional fields, and the transport ([`transport`]) caches resolved
//! request URIs and parses every response body as JSON. Failures are
//! classified ([`classify`]) into operator-facing diagnostics; auth-related
//! ones flip a shared [`credential::CredentialMonitor`] and reach an
//! injected [`notify::NotifySink`].
//!
//! # Example
//!
//! ```no_run
//! use openai_bridge::{ApiConfig, ChatMessage, OpenAiClient};
//!
//! # async fn demo() -> Result<(), openai_bridge::Error> {
//! let config = ApiConfig::new("sk-...");
//! let client = OpenAiClient::builder(config).build()?;
//! if client.verify_key().await {
//!     let reply = client.simple_chat(&[ChatMessage::user("Hello!")]).await;
//!     println!("{reply:?}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod client;
pub mod config;
pub mod credential;
pub mod endpoint;
pub mod error;
pub mod notify;
pub mod payload;
pub mod transport;

pub use classify::{classify, Diagnostic};
pub use client::{ClientBuilder, OpenAiClient};
pub use config::{ApiConfig, AssistantDefaults, ChatDefaults, PLACEHOLDER_API_KEY};
pub use credential::CredentialMonitor;
pub use endpoint::{Endpoint, ListQuery, Verb};
pub use error::Error;
pub use notify::{noop_sink, MemorySink, NotifySink, TracingSink};
pub use payload::{
    AssistantOptions, ChatMessage, ChatOptions, MessageOptions, RunOptions, ThreadAndRunOptions,
    ThreadOptions, VectorStoreOptions, VectorStoreUpdate,
};

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
