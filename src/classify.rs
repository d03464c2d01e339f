//! Failure classification.
//!
//! Maps a raw dispatch failure to an operator-facing diagnostic plus an
//! auth-relevance flag. Success values are never classified; they flow to
//! the caller untouched.

use crate::error::Error;

/// Outcome of classifying one failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Human-readable message for logs and operator notification.
    pub message: String,
    /// Whether the failure should flag the credential as invalid.
    pub auth_related: bool,
}

/// Classify a failed dispatch.
///
/// Any HTTP-level error is treated as potentially auth-related: the status
/// and body alone cannot cheaply separate a revoked key from a rate limit
/// or a server fault, so a 429 or 500 will also flag the key and alert
/// operators. Over-broad on purpose; narrowing this is a maintainer
/// decision, not a local fix.
pub fn classify(error: &Error) -> Diagnostic {
    match error {
        Error::Transport(msg) => Diagnostic {
            message: format!("request failed before a response was received: {msg}"),
            auth_related: false,
        },
        Error::Http { status, body } => Diagnostic {
            message: format!("OpenAI API error: HTTP {status}: {body}"),
            auth_related: true,
        },
        Error::Malformed(msg) => Diagnostic {
            message: format!("error parsing API response: {msg}"),
            auth_related: false,
        },
        Error::Construction(msg) => Diagnostic {
            message: format!("error initiating API request: {msg}"),
            auth_related: false,
        },
    }
}
