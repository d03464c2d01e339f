use thiserror::Error;

/// Unified error type for the dispatch pipeline.
///
/// Every failure a call can produce collapses into one of four categories.
/// The first three are produced by the transport after dispatch; the last is
/// produced during request construction and never reaches the network. None
/// of them propagate to callers of the endpoint surface: the classifier
/// handles all four locally and callers observe absence (see
/// [`crate::classify`]).
#[derive(Debug, Error)]
pub enum Error {
    /// No response was obtained: DNS, connection, TLS, or timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// A response was obtained but carries an HTTP-level error status.
    /// The raw body text is preserved for operator diagnostics.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// Transport succeeded but the body could not be parsed as JSON.
    #[error("malformed response body: {0}")]
    Malformed(String),

    /// The request could not be constructed (e.g. an unresolved path
    /// parameter). Fatal to the call, never retried.
    #[error("request construction error: {0}")]
    Construction(String),
}

impl Error {
    /// Create a new construction error.
    pub fn construction(msg: impl Into<String>) -> Self {
        Error::Construction(msg.into())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}
