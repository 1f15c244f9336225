use thiserror::Error;

/// Errors surfaced by the verifier HTTP clients.
///
/// These never escape the top-level `verify_*` entry points; each source
/// degrades to a negative result with the error preserved in the report.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Network, TLS, or timeout failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A base URL override could not be parsed.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
