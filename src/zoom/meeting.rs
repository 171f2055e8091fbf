use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::{AccessToken, MeetingCreationError, RequestError, ZoomClient};

pub const INSTANT_MEETING_TOPIC: &str = "My NodeJS Meeting";

/// Zoom meeting type 2 (scheduled, started immediately by the host).
const INSTANT_MEETING_TYPE: u8 = 2;

/// Body for `POST /users/me/meetings`. Only [`MeetingRequest::instant`] builds one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingRequest {
    topic: &'static str,
    #[serde(rename = "type")]
    meeting_type: u8,
    settings: MeetingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeetingSettings {
    join_before_host: bool,
    waiting_room: bool,
}

impl MeetingRequest {
    pub fn instant() -> Self {
        Self {
            topic: INSTANT_MEETING_TOPIC,
            meeting_type: INSTANT_MEETING_TYPE,
            settings: MeetingSettings {
                join_before_host: true,
                waiting_room: false,
            },
        }
    }
}

/// The subset of the created meeting this tool reads. Other fields are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Meeting {
    pub join_url: String,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub topic: Option<String>,
}

impl ZoomClient {
    /// Build the meeting creation request without sending it.
    pub fn meeting_request(&self, token: &AccessToken) -> Result<reqwest::Request, RequestError> {
        let url = format!("{}/users/me/meetings", self.api_base_url);

        let request = self
            .client
            .post(url)
            .header(AUTHORIZATION, token.bearer())
            .header(CONTENT_TYPE, "application/json")
            .json(&MeetingRequest::instant())
            .build()?;

        Ok(request)
    }

    /// Create an instant meeting for the user that owns the token.
    pub async fn create_meeting(
        &self,
        token: &AccessToken,
    ) -> Result<Meeting, MeetingCreationError> {
        match self.post_meeting(token).await {
            Ok(meeting) => Ok(meeting),
            Err(err) => {
                error!("Error creating meeting: {}", err);
                Err(MeetingCreationError::Request(err))
            }
        }
    }

    async fn post_meeting(&self, token: &AccessToken) -> Result<Meeting, RequestError> {
        let request = self.meeting_request(token)?;
        let body = self.execute(request).await?;

        info!("Meeting created: {}", body);

        let meeting: Meeting = serde_json::from_str(&body)?;
        debug!("Meeting id: {:?}, topic: {:?}", meeting.id, meeting.topic);
        Ok(meeting)
    }
}
