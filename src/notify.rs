//! Operator notification seam.
//!
//! The client calls [`NotifySink::notify`] with a human-readable diagnostic
//! whenever credential validity flips. How that message reaches privileged
//! users (chat channel, pager, console) is the host's concern; the default
//! is a no-op sink.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Destination for operator-directed diagnostics.
#[async_trait]
pub trait NotifySink: Send + Sync {
    async fn notify(&self, message: &str);
}

/// Sink that discards every message.
pub struct NoopSink;

#[async_trait]
impl NotifySink for NoopSink {
    async fn notify(&self, _message: &str) {}
}

/// Convenience constructor for the default sink.
pub fn noop_sink() -> Arc<dyn NotifySink> {
    Arc::new(NoopSink)
}

/// Sink that forwards diagnostics to the tracing error stream.
pub struct TracingSink;

#[async_trait]
impl NotifySink for TracingSink {
    async fn notify(&self, message: &str) {
        tracing::error!(target: "openai_bridge::notify", "{message}");
    }
}

/// In-memory sink, for tests and hosts that drain notifications themselves.
#[derive(Default)]
pub struct MemorySink {
    messages: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every message received so far, in arrival order.
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl NotifySink for MemorySink {
    async fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_sink_records_in_order() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.notify("first").await;
        sink.notify("second").await;

        assert_eq!(sink.messages(), vec!["first", "second"]);
        assert_eq!(sink.len(), 2);
    }
}
