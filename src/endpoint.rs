//! Endpoint descriptors and the static endpoint table.
//!
//! An endpoint is a fixed (verb, path template) pair plus a flag for the
//! beta feature header the assistants resource family requires. The table
//! is defined once at compile time; everything per-call (path parameters,
//! list queries, payloads) is supplied by the caller.

use crate::error::Error;
use crate::Result;
use url::form_urlencoded;

/// HTTP verbs used by the API surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Delete,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Delete => "DELETE",
        }
    }
}

/// A fixed (verb, URL template) pair representing one remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub verb: Verb,
    /// Path template, possibly containing `{name}` tokens.
    pub path: &'static str,
    /// Whether the `OpenAI-Beta: assistants=v2` header is required.
    pub beta: bool,
}

impl Endpoint {
    pub const fn new(verb: Verb, path: &'static str, beta: bool) -> Self {
        Self { verb, path, beta }
    }

    /// Substitute `{name}` tokens by exact match.
    ///
    /// A parameter that matches no token, or a token left unresolved after
    /// substitution, is a caller error: the call fails before anything
    /// reaches the network.
    pub fn resolve_path(&self, params: &[(&str, &str)]) -> Result<String> {
        let mut path = self.path.to_string();
        for (name, value) in params {
            let token = format!("{{{name}}}");
            if !path.contains(&token) {
                return Err(Error::construction(format!(
                    "path parameter `{name}` does not appear in `{}`",
                    self.path
                )));
            }
            path = path.replace(&token, value);
        }
        if let Some(start) = path.find('{') {
            let token: String = path[start..]
                .chars()
                .take_while(|c| *c != '}')
                .skip(1)
                .collect();
            return Err(Error::construction(format!(
                "unresolved path parameter `{token}` in `{}`",
                self.path
            )));
        }
        Ok(path)
    }
}

/// Pagination and filtering for list endpoints.
///
/// Only supplied, non-default values appear in the query string; the remote
/// applies `limit=20` / `order=desc` when they are omitted.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    pub limit: Option<u32>,
    pub order: Option<String>,
    pub after: Option<String>,
    pub before: Option<String>,
    /// Only meaningful when listing messages.
    pub run_id: Option<String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn order(mut self, order: impl Into<String>) -> Self {
        self.order = Some(order.into());
        self
    }

    pub fn after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    pub fn before(mut self, before: impl Into<String>) -> Self {
        self.before = Some(before.into());
        self
    }

    pub fn run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    /// Render as a `?k=v&...` suffix; empty when every field is default.
    /// Values are percent-encoded.
    pub(crate) fn to_query(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();
        if let Some(limit) = self.limit {
            if limit != 20 {
                pairs.push(("limit", limit.to_string()));
            }
        }
        if let Some(order) = self.order.as_deref() {
            if order != "desc" {
                pairs.push(("order", order.to_string()));
            }
        }
        if let Some(after) = self.after.as_deref() {
            pairs.push(("after", after.to_string()));
        }
        if let Some(before) = self.before.as_deref() {
            pairs.push(("before", before.to_string()));
        }
        if let Some(run_id) = self.run_id.as_deref() {
            pairs.push(("run_id", run_id.to_string()));
        }
        if pairs.is_empty() {
            return String::new();
        }
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(pairs)
            .finish();
        format!("?{encoded}")
    }
}

/// The declarative endpoint table. Each entry is a mechanical instantiation
/// of the shared dispatch pipeline; none carries logic of its own.
pub(crate) mod table {
    use super::{Endpoint, Verb};

    pub const LIST_MODELS: Endpoint = Endpoint::new(Verb::Get, "/v1/models", false);
    pub const CHAT_COMPLETIONS: Endpoint = Endpoint::new(Verb::Post, "/v1/chat/completions", false);

    pub const CREATE_ASSISTANT: Endpoint = Endpoint::new(Verb::Post, "/v1/assistants", true);

    pub const CREATE_THREAD: Endpoint = Endpoint::new(Verb::Post, "/v1/threads", true);
    pub const RETRIEVE_THREAD: Endpoint = Endpoint::new(Verb::Get, "/v1/threads/{thread_id}", true);
    pub const MODIFY_THREAD: Endpoint = Endpoint::new(Verb::Post, "/v1/threads/{thread_id}", true);
    pub const DELETE_THREAD: Endpoint =
        Endpoint::new(Verb::Delete, "/v1/threads/{thread_id}", true);

    pub const CREATE_MESSAGE: Endpoint =
        Endpoint::new(Verb::Post, "/v1/threads/{thread_id}/messages", true);
    pub const LIST_MESSAGES: Endpoint =
        Endpoint::new(Verb::Get, "/v1/threads/{thread_id}/messages", true);
    pub const RETRIEVE_MESSAGE: Endpoint = Endpoint::new(
        Verb::Get,
        "/v1/threads/{thread_id}/messages/{message_id}",
        true,
    );
    pub const MODIFY_MESSAGE: Endpoint = Endpoint::new(
        Verb::Post,
        "/v1/threads/{thread_id}/messages/{message_id}",
        true,
    );
    pub const DELETE_MESSAGE: Endpoint = Endpoint::new(
        Verb::Delete,
        "/v1/threads/{thread_id}/messages/{message_id}",
        true,
    );

    pub const CREATE_RUN: Endpoint =
        Endpoint::new(Verb::Post, "/v1/threads/{thread_id}/runs", true);
    pub const CREATE_THREAD_AND_RUN: Endpoint =
        Endpoint::new(Verb::Post, "/v1/threads/runs", true);
    pub const LIST_RUNS: Endpoint = Endpoint::new(Verb::Get, "/v1/threads/{thread_id}/runs", true);
    pub const RETRIEVE_RUN: Endpoint =
        Endpoint::new(Verb::Get, "/v1/threads/{thread_id}/runs/{run_id}", true);
    pub const MODIFY_RUN: Endpoint =
        Endpoint::new(Verb::Post, "/v1/threads/{thread_id}/runs/{run_id}", true);
    pub const SUBMIT_TOOL_OUTPUTS: Endpoint = Endpoint::new(
        Verb::Post,
        "/v1/threads/{thread_id}/runs/{run_id}/submit_tool_outputs",
        true,
    );
    pub const CANCEL_RUN: Endpoint = Endpoint::new(
        Verb::Post,
        "/v1/threads/{thread_id}/runs/{run_id}/cancel",
        true,
    );

    pub const LIST_RUN_STEPS: Endpoint = Endpoint::new(
        Verb::Get,
        "/v1/threads/{thread_id}/runs/{run_id}/steps",
        true,
    );
    pub const RETRIEVE_RUN_STEP: Endpoint = Endpoint::new(
        Verb::Get,
        "/v1/threads/{thread_id}/runs/{run_id}/steps/{step_id}",
        true,
    );

    pub const CREATE_VECTOR_STORE: Endpoint = Endpoint::new(Verb::Post, "/v1/vector_stores", true);
    pub const LIST_VECTOR_STORES: Endpoint = Endpoint::new(Verb::Get, "/v1/vector_stores", true);
    pub const RETRIEVE_VECTOR_STORE: Endpoint =
        Endpoint::new(Verb::Get, "/v1/vector_stores/{vector_store_id}", true);
    pub const MODIFY_VECTOR_STORE: Endpoint =
        Endpoint::new(Verb::Post, "/v1/vector_stores/{vector_store_id}", true);
    pub const DELETE_VECTOR_STORE: Endpoint =
        Endpoint::new(Verb::Delete, "/v1/vector_stores/{vector_store_id}", true);
}
