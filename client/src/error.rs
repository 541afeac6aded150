//! Error types for the client.

/// Failures of a single API call.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with an error envelope or a non-success status.
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// HTTP status of an API failure, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            ClientError::InvalidResponse(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
