//! Assistants resource family: assistants, threads, messages, runs, and
//! run steps. Every call here carries the beta feature header.

use crate::client::core::OpenAiClient;
use crate::endpoint::{table, ListQuery};
use crate::payload::{
    AssistantOptions, ChatMessage, MessageOptions, RunOptions, ThreadAndRunOptions, ThreadOptions,
};
use serde_json::{json, Value};
use std::collections::HashMap;

impl OpenAiClient {
    /// Create an assistant on the configured assistant model.
    pub async fn create_assistant(&self, options: &AssistantOptions) -> Option<Value> {
        let body = self.body_from(options, vec![("model", json!(self.config.assistant.model))]);
        self.call(&table::CREATE_ASSISTANT, &[], None, body).await
    }

    /// Create a thread. `messages` is always serialized, empty when the
    /// caller has none to seed.
    pub async fn create_thread(
        &self,
        messages: &[ChatMessage],
        options: &ThreadOptions,
    ) -> Option<Value> {
        let body = self.body_from(options, vec![("messages", json!(messages))]);
        self.call(&table::CREATE_THREAD, &[], None, body).await
    }

    pub async fn retrieve_thread(&self, thread_id: &str) -> Option<Value> {
        self.call(
            &table::RETRIEVE_THREAD,
            &[("thread_id", thread_id)],
            None,
            Ok(None),
        )
        .await
    }

    pub async fn modify_thread(&self, thread_id: &str, options: &ThreadOptions) -> Option<Value> {
        let body = self.body_from(options, Vec::new());
        self.call(
            &table::MODIFY_THREAD,
            &[("thread_id", thread_id)],
            None,
            body,
        )
        .await
    }

    pub async fn delete_thread(&self, thread_id: &str) -> Option<Value> {
        self.call(
            &table::DELETE_THREAD,
            &[("thread_id", thread_id)],
            None,
            Ok(None),
        )
        .await
    }

    /// Add a message to a thread. `content` may be a plain string or the
    /// structured content-part form; both pass through unchanged.
    pub async fn create_message(
        &self,
        thread_id: &str,
        role: &str,
        content: Value,
        options: &MessageOptions,
    ) -> Option<Value> {
        let body = self.body_from(options, vec![("role", json!(role)), ("content", content)]);
        self.call(
            &table::CREATE_MESSAGE,
            &[("thread_id", thread_id)],
            None,
            body,
        )
        .await
    }

    pub async fn list_messages(&self, thread_id: &str, query: &ListQuery) -> Option<Value> {
        self.call(
            &table::LIST_MESSAGES,
            &[("thread_id", thread_id)],
            Some(query),
            Ok(None),
        )
        .await
    }

    pub async fn retrieve_message(&self, thread_id: &str, message_id: &str) -> Option<Value> {
        self.call(
            &table::RETRIEVE_MESSAGE,
            &[("thread_id", thread_id), ("message_id", message_id)],
            None,
            Ok(None),
        )
        .await
    }

    pub async fn modify_message(
        &self,
        thread_id: &str,
        message_id: &str,
        metadata: &HashMap<String, String>,
    ) -> Option<Value> {
        self.call(
            &table::MODIFY_MESSAGE,
            &[("thread_id", thread_id), ("message_id", message_id)],
            None,
            Ok(Some(json!({ "metadata": metadata }))),
        )
        .await
    }

    pub async fn delete_message(&self, thread_id: &str, message_id: &str) -> Option<Value> {
        self.call(
            &table::DELETE_MESSAGE,
            &[("thread_id", thread_id), ("message_id", message_id)],
            None,
            Ok(None),
        )
        .await
    }

    /// Start a run on an existing thread. Model and token budgets always
    /// come from the configured assistant defaults.
    pub async fn create_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
        options: &RunOptions,
    ) -> Option<Value> {
        let body = self.body_from(options, self.run_defaults(assistant_id));
        self.call(&table::CREATE_RUN, &[("thread_id", thread_id)], None, body)
            .await
    }

    /// Create a thread and immediately run it.
    pub async fn create_thread_and_run(
        &self,
        assistant_id: &str,
        options: &ThreadAndRunOptions,
    ) -> Option<Value> {
        let body = self.body_from(options, self.run_defaults(assistant_id));
        self.call(&table::CREATE_THREAD_AND_RUN, &[], None, body)
            .await
    }

    pub async fn list_runs(&self, thread_id: &str, query: &ListQuery) -> Option<Value> {
        self.call(
            &table::LIST_RUNS,
            &[("thread_id", thread_id)],
            Some(query),
            Ok(None),
        )
        .await
    }

    pub async fn retrieve_run(&self, thread_id: &str, run_id: &str) -> Option<Value> {
        self.call(
            &table::RETRIEVE_RUN,
            &[("thread_id", thread_id), ("run_id", run_id)],
            None,
            Ok(None),
        )
        .await
    }

    pub async fn modify_run(
        &self,
        thread_id: &str,
        run_id: &str,
        metadata: &HashMap<String, String>,
    ) -> Option<Value> {
        self.call(
            &table::MODIFY_RUN,
            &[("thread_id", thread_id), ("run_id", run_id)],
            None,
            Ok(Some(json!({ "metadata": metadata }))),
        )
        .await
    }

    /// Submit tool outputs for a run waiting on them.
    pub async fn submit_tool_outputs(
        &self,
        thread_id: &str,
        run_id: &str,
        tool_outputs: Value,
        stream: Option<bool>,
    ) -> Option<Value> {
        let mut body = serde_json::Map::new();
        body.insert("tool_outputs".to_string(), tool_outputs);
        if let Some(stream) = stream {
            body.insert("stream".to_string(), json!(stream));
        }
        self.call(
            &table::SUBMIT_TOOL_OUTPUTS,
            &[("thread_id", thread_id), ("run_id", run_id)],
            None,
            Ok(Some(Value::Object(body))),
        )
        .await
    }

    /// Cancel an in-progress run. Bodyless POST on the wire (empty object).
    pub async fn cancel_run(&self, thread_id: &str, run_id: &str) -> Option<Value> {
        self.call(
            &table::CANCEL_RUN,
            &[("thread_id", thread_id), ("run_id", run_id)],
            None,
            Ok(Some(json!({}))),
        )
        .await
    }

    pub async fn list_run_steps(
        &self,
        thread_id: &str,
        run_id: &str,
        query: &ListQuery,
    ) -> Option<Value> {
        self.call(
            &table::LIST_RUN_STEPS,
            &[("thread_id", thread_id), ("run_id", run_id)],
            Some(query),
            Ok(None),
        )
        .await
    }

    pub async fn retrieve_run_step(
        &self,
        thread_id: &str,
        run_id: &str,
        step_id: &str,
    ) -> Option<Value> {
        self.call(
            &table::RETRIEVE_RUN_STEP,
            &[
                ("thread_id", thread_id),
                ("run_id", run_id),
                ("step_id", step_id),
            ],
            None,
            Ok(None),
        )
        .await
    }

    fn run_defaults(&self, assistant_id: &str) -> Vec<(&'static str, Value)> {
        vec![
            ("assistant_id", json!(assistant_id)),
            ("model", json!(self.config.assistant.model)),
            (
                "max_prompt_tokens",
                json!(self.config.assistant.max_prompt_tokens),
            ),
            (
                "max_completion_tokens",
                json!(self.config.assistant.max_completion_tokens),
            ),
        ]
    }
}
