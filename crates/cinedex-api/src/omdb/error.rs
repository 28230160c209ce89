//! `OmdbError` - failure kinds of a single OMDb request.

use thiserror::Error;

/// Result alias for OMDb operations.
pub type Result<T, E = OmdbError> = std::result::Result<T, E>;

/// Errors returned by the OMDb client.
///
/// `Configuration`, `Authentication`, `Transport` and `Upstream` mirror how
/// the upstream API reports problems. `Build` covers builder misuse;
/// `Network` and `Decode` cover failures below the HTTP status line.
#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum OmdbError {
    /// No API key is configured. Raised before any network I/O.
    #[error("OMDb API key is not configured")]
    Configuration,

    /// The client builder was given incomplete or invalid settings.
    #[error("invalid OMDb client settings: {0}")]
    Build(&'static str),

    /// The upstream rejected the API key (HTTP 401). Displays the upstream text.
    #[error("{0}")]
    Authentication(String),

    /// Non-success HTTP status other than 401.
    #[error("API request failed: {status} {status_text}")]
    Transport {
        /// Numeric HTTP status.
        status: u16,
        /// Canonical reason phrase for the status.
        status_text: String,
    },

    /// HTTP 200 whose payload reports `Response: "False"` with an error text.
    #[error("{0}")]
    Upstream(String),

    /// The request could not be sent or the body could not be read.
    #[error("OMDb API request could not be completed")]
    Network(#[source] reqwest::Error),

    /// The body was not the JSON shape the endpoint documents.
    #[error("failed to decode OMDb API response")]
    Decode(#[source] serde_json::Error),
}

impl OmdbError {
    /// Returns `true` for the application-level error embedded in a 200 response.
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }
}
