//! Error types for the connect crate.

use thiserror::Error;

use tandem_core::partnerships::{classify_remote_error, PartnerError};

/// Result type alias for connect operations.
pub type Result<T> = std::result::Result<T, ConnectError>;

/// Errors that can occur while talking to the partner authority.
#[derive(Debug, Error)]
pub enum ConnectError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error response from the remote authority
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Invalid request (missing required data, etc.)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ConnectError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

/// Converts a transport-level failure into the core partner taxonomy.
///
/// API error messages go through `classify_remote_error`; everything else
/// is a network problem as far as the domain is concerned.
impl From<ConnectError> for tandem_core::Error {
    fn from(err: ConnectError) -> Self {
        let partner_error = match err {
            ConnectError::Api { status: 429, .. } => PartnerError::RateLimited,
            ConnectError::Api { message, .. } => classify_remote_error(&message),
            ConnectError::Http(e) => PartnerError::NetworkError(e.to_string()),
            ConnectError::Json(e) => PartnerError::Unknown(e.to_string()),
            ConnectError::InvalidRequest(msg) => PartnerError::Unknown(msg),
        };
        tandem_core::Error::Partner(partner_error)
    }
}
