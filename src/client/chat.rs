//! Model listing and chat-completion endpoints.

use crate::client::core::OpenAiClient;
use crate::endpoint::table;
use crate::payload::{ChatMessage, ChatOptions};
use serde_json::{json, Value};
use tracing::error;

impl OpenAiClient {
    /// List models available to the credential; raw listing object.
    pub async fn list_models(&self) -> Option<Value> {
        self.call(&table::LIST_MODELS, &[], None, Ok(None)).await
    }

    /// List model identifiers. Resolves to an empty vector on any failure,
    /// matching the uniform absence contract.
    pub async fn list_model_ids(&self) -> Vec<String> {
        let Some(response) = self.list_models().await else {
            return Vec::new();
        };
        match response.get("data").and_then(Value::as_array) {
            Some(models) => models
                .iter()
                .filter_map(|model| model.get("id").and_then(Value::as_str))
                .map(str::to_string)
                .collect(),
            None => {
                error!("model listing carried no `data` array");
                Vec::new()
            }
        }
    }

    /// Chat completion with the full optional parameter set.
    ///
    /// `model` and `max_tokens` always come from the configured chat
    /// defaults; only supplied options appear in the body.
    pub async fn create_chat(
        &self,
        messages: &[ChatMessage],
        options: &ChatOptions,
    ) -> Option<Value> {
        let body = self.body_from(
            options,
            vec![
                ("model", json!(self.config.chat.model)),
                ("messages", json!(messages)),
                ("max_tokens", json!(self.config.chat.max_tokens)),
            ],
        );
        self.call(&table::CHAT_COMPLETIONS, &[], None, body).await
    }

    /// Chat completion with no optional parameters: exactly `model`,
    /// `messages`, and `max_tokens` on the wire.
    pub async fn simple_chat(&self, messages: &[ChatMessage]) -> Option<Value> {
        self.create_chat(messages, &ChatOptions::default()).await
    }
}
