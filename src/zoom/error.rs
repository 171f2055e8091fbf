use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single HTTP exchange with Zoom.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("failed to parse response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl RequestError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status(),
            Self::Decode(_) => None,
        }
    }
}

#[derive(Debug, Error)]
#[error("failed to get access token")]
pub struct TokenAcquisitionError(#[source] pub RequestError);

#[derive(Debug, Error)]
pub enum MeetingCreationError {
    /// No token was available, so the meetings endpoint was never called.
    #[error("failed to create meeting: no access token")]
    Token(#[from] TokenAcquisitionError),

    #[error("failed to create meeting")]
    Request(#[source] RequestError),
}
