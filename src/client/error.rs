//! Client error types
//!
//! Every failed request ends up as a [`ClientError`]. There is deliberately
//! one type for all endpoints: callers decide what to tell the user.

use thiserror::Error;

use super::auth::TokenStoreError;

/// Errors that can occur when talking to the Podium API
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server answered with a non-2xx status
    #[error("Request failed with HTTP status {status}")]
    Status { status: u16 },

    /// The request never produced a response
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// The request body could not be serialized
    #[error("Failed to encode request body: {0}")]
    Encode(serde_json::Error),

    /// The response body did not match the expected shape
    #[error("Failed to decode response body: {0}")]
    Decode(serde_json::Error),

    /// The stored token contains characters not allowed in a header
    #[error("Stored token is not a valid header value")]
    InvalidToken,

    /// Reading or writing the persisted token failed
    #[error("Token storage error: {0}")]
    TokenStore(#[from] TokenStoreError),
}

impl ClientError {
    /// HTTP status of the failed response, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status } => Some(*status),
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for 401 responses (missing or expired token)
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
