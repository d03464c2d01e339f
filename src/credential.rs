//! Credential validity monitor.
//!
//! Process-wide belief about whether the configured API key is usable. The
//! state is owned by the client and injected where needed rather than held
//! in an ambient static. Initially `Valid`; flipped to `Invalid` by any
//! auth-related classification or a failed startup verification. There is
//! no automatic recovery: only a fresh verification call that succeeds
//! transitions back.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Shared validity flag plus the most recent diagnostic message.
///
/// Written from any completion thread; reads are a single atomic load so
/// anything gating behavior on key health can poll cheaply.
pub struct CredentialMonitor {
    valid: AtomicBool,
    last_diagnostic: Mutex<Option<String>>,
}

impl CredentialMonitor {
    pub fn new() -> Self {
        Self {
            valid: AtomicBool::new(true),
            last_diagnostic: Mutex::new(None),
        }
    }

    /// Current belief about the key.
    pub fn is_valid(&self) -> bool {
        self.valid.load(Ordering::Acquire)
    }

    /// Record an auth-related failure.
    ///
    /// Returns `true` when this call performed the `Valid -> Invalid`
    /// transition (as opposed to the key already being flagged).
    pub fn mark_invalid(&self, diagnostic: &str) -> bool {
        *self.last_diagnostic.lock().unwrap() = Some(diagnostic.to_string());
        self.valid.swap(false, Ordering::AcqRel)
    }

    /// Restore validity after a successful verification call.
    pub fn mark_valid(&self) {
        self.valid.store(true, Ordering::Release);
        *self.last_diagnostic.lock().unwrap() = None;
    }

    /// Most recent diagnostic, if the key has ever been flagged.
    pub fn last_diagnostic(&self) -> Option<String> {
        self.last_diagnostic.lock().unwrap().clone()
    }
}

impl Default for CredentialMonitor {
    fn default() -> Self {
        Self::new()
    }
}
