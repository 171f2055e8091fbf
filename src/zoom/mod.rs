//! HTTP client for the two Zoom endpoints involved in creating a meeting.
//!
//! The token exchange lives in `auth`, the meeting call in `meeting`. Both share the
//! status handling in `ZoomClient::execute`.

use crate::config::ZoomConfig;
use std::time::Duration;
use tracing::{debug, info};

mod auth;
mod error;
mod meeting;

pub use auth::{basic_authorization, AccessToken};
pub use error::{MeetingCreationError, RequestError, TokenAcquisitionError};
pub use meeting::{Meeting, MeetingRequest, MeetingSettings, INSTANT_MEETING_TOPIC};

pub struct ZoomClient {
    client: reqwest::Client,
    auth_token_url: String,
    api_base_url: String,
}

impl ZoomClient {
    pub fn new(config: &ZoomConfig) -> Result<Self, RequestError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        info!(
            "Initialized Zoom client with API base URL: {}",
            config.api_base_url
        );

        Ok(Self {
            client,
            auth_token_url: config.auth_token_url.clone(),
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Send a prepared request and return the body of a 2xx response.
    async fn execute(&self, request: reqwest::Request) -> Result<String, RequestError> {
        debug!("{} {}", request.method(), request.url());

        let response = self.client.execute(request).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(RequestError::Status { status, body });
        }

        debug!("Response {} ({} bytes)", status, body.len());
        Ok(body)
    }
}
