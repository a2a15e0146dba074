use thiserror::Error;

/// Every way a CouchDB call can fail.
///
/// Transport and decode failures come straight from `reqwest` and
/// `serde_json`. Application failures (`Couch`) are only raised when the
/// caller asks for them through [`OperationResponse::into_result`] or
/// [`CouchDocument::check`], since CouchDB reports them inside an otherwise
/// successful HTTP exchange.
///
/// [`OperationResponse::into_result`]: crate::OperationResponse::into_result
/// [`CouchDocument::check`]: crate::CouchDocument::check
#[derive(Debug, Error)]
pub enum CouchError {
    /// The request never produced a readable response body.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A test double or custom transport reporting a failure of its own.
    #[error("transport error: {0}")]
    TransportOther(String),

    /// The response body was not the JSON shape we expected.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The outgoing document could not be turned into JSON.
    #[error("failed to encode document: {0}")]
    Encode(String),

    /// No document URL can be derived from the given body.
    #[error("invalid document: {0}")]
    InvalidDocument(String),

    /// CouchDB answered with `error`/`reason`.
    #[error("couchdb error `{error}`: {reason}")]
    Couch { error: String, reason: String },

    /// Session configuration is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl CouchError {
    pub fn couch(error: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Couch {
            error: error.into(),
            reason: reason.into(),
        }
    }

    /// True for failures that happened before any JSON was seen.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::TransportOther(_))
    }
}
