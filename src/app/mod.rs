use crate::config::{Config, Credentials};
use crate::zoom::{MeetingCreationError, ZoomClient};
use anyhow::{Context, Result};
use tracing::{error, info};

/// Acquire a token, then create an instant meeting with it and return the join URL.
///
/// A token failure short-circuits: the meetings endpoint is never called.
pub async fn create_instant_meeting(
    client: &ZoomClient,
    credentials: &Credentials,
) -> Result<String, MeetingCreationError> {
    let token = client.acquire_token(credentials).await?;
    let meeting = client.create_meeting(&token).await?;
    Ok(meeting.join_url)
}

pub async fn run_create(config: &Config, credentials: &Credentials) -> Result<String> {
    info!("Creating instant Zoom meeting");

    let client = ZoomClient::new(&config.zoom).context("Failed to build HTTP client")?;

    match create_instant_meeting(&client, credentials).await {
        Ok(join_url) => {
            info!("Join URL: {}", join_url);
            Ok(join_url)
        }
        Err(err) => {
            error!("Meeting creation failed: {}", err);
            Err(err.into())
        }
    }
}
