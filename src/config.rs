//! Resolved configuration consumed by the client.
//!
//! Loading and persistence belong to the host environment; the client only
//! consumes an already-resolved key and the two named default-model
//! settings. The structures are serde-deserializable so hosts can map their
//! own config files onto them directly.

use serde::{Deserialize, Serialize};

/// Key value shipped in freshly generated host configs. A client holding
/// this key skips startup verification instead of burning a request.
pub const PLACEHOLDER_API_KEY: &str = "your-api-key-here";

/// Resolved API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Bearer credential for every request.
    #[serde(default = "default_api_key")]
    pub api_key: String,
    /// Defaults injected into every chat-completion payload.
    #[serde(default)]
    pub chat: ChatDefaults,
    /// Defaults injected into every assistant-run payload.
    #[serde(default)]
    pub assistant: AssistantDefaults,
}

impl ApiConfig {
    /// Config with the given key and stock model defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            chat: ChatDefaults::default(),
            assistant: AssistantDefaults::default(),
        }
    }

    /// Whether the key is present and not the shipped placeholder.
    pub fn has_usable_key(&self) -> bool {
        !self.api_key.is_empty() && self.api_key != PLACEHOLDER_API_KEY
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(PLACEHOLDER_API_KEY)
    }
}

/// Default model settings for the chat-completion family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatDefaults {
    pub model: String,
    pub max_tokens: u32,
}

impl Default for ChatDefaults {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            max_tokens: 150,
        }
    }
}

/// Default model settings for the assistants family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantDefaults {
    pub model: String,
    pub max_prompt_tokens: u32,
    pub max_completion_tokens: u32,
}

impl Default for AssistantDefaults {
    fn default() -> Self {
        Self {
            model: "gpt-4o".to_string(),
            max_prompt_tokens: 150,
            max_completion_tokens: 150,
        }
    }
}

fn default_api_key() -> String {
    PLACEHOLDER_API_KEY.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_key_is_not_usable() {
        let config = ApiConfig::default();
        assert!(!config.has_usable_key());

        let empty = ApiConfig::new("");
        assert!(!empty.has_usable_key());

        let real = ApiConfig::new("sk-test");
        assert!(real.has_usable_key());
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let config: ApiConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.api_key, PLACEHOLDER_API_KEY);
        assert_eq!(config.chat.model, "gpt-4o");
        assert_eq!(config.chat.max_tokens, 150);
        assert_eq!(config.assistant.max_prompt_tokens, 150);
        assert_eq!(config.assistant.max_completion_tokens, 150);
    }
}
