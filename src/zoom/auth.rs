use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde::Deserialize;
use std::fmt;
use tracing::{debug, error, info};

use super::{RequestError, TokenAcquisitionError, ZoomClient};
use crate::config::Credentials;

const GRANT_TYPE: &str = "account_credentials";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Bearer token returned by the account credentials grant.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// `Basic` authorization header value for the client id and secret.
pub fn basic_authorization(credentials: &Credentials) -> String {
    let pair = format!("{}:{}", credentials.client_id, credentials.client_secret);
    format!("Basic {}", BASE64.encode(pair))
}

impl ZoomClient {
    /// Build the token request without sending it.
    pub fn token_request(
        &self,
        credentials: &Credentials,
    ) -> Result<reqwest::Request, RequestError> {
        let request = self
            .client
            .post(&self.auth_token_url)
            .query(&[
                ("grant_type", GRANT_TYPE),
                ("account_id", credentials.account_id.as_str()),
            ])
            .header(AUTHORIZATION, basic_authorization(credentials))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .build()?;

        Ok(request)
    }

    /// Exchange the account credentials for an access token.
    pub async fn acquire_token(
        &self,
        credentials: &Credentials,
    ) -> Result<AccessToken, TokenAcquisitionError> {
        debug!(
            "Requesting access token for account {}",
            credentials.account_id
        );

        match self.fetch_token(credentials).await {
            Ok(token) => {
                info!("Access token acquired");
                Ok(token)
            }
            Err(err) => {
                error!("Error getting access token: {}", err);
                Err(TokenAcquisitionError(err))
            }
        }
    }

    async fn fetch_token(&self, credentials: &Credentials) -> Result<AccessToken, RequestError> {
        let request = self.token_request(credentials)?;
        let body = self.execute(request).await?;
        let response: TokenResponse = serde_json::from_str(&body)?;
        Ok(AccessToken(response.access_token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ZoomConfig;
    use reqwest::StatusCode;
    use wiremock::matchers::{body_string, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ZoomClient {
        ZoomClient::new(&ZoomConfig {
            auth_token_url: format!("{}/oauth/token", server.uri()),
            api_base_url: format!("{}/v2", server.uri()),
            request_timeout_secs: Some(5),
        })
        .unwrap()
    }

    #[test]
    fn test_basic_authorization() {
        let credentials = Credentials::new("id", "secret", "acct");
        assert_eq!(basic_authorization(&credentials), "Basic aWQ6c2VjcmV0");

        let credentials = Credentials::new("my-client", "my-secret", "acct");
        assert_eq!(
            basic_authorization(&credentials),
            "Basic bXktY2xpZW50Om15LXNlY3JldA=="
        );
    }

    #[test]
    fn test_basic_authorization_with_empty_credentials() {
        let credentials = Credentials::new("", "", "");
        assert_eq!(basic_authorization(&credentials), "Basic Og==");
    }

    #[test]
    fn test_token_request_shape() {
        let client = ZoomClient::new(&ZoomConfig::default()).unwrap();
        let credentials = Credentials::new("id", "secret", "acct-42");

        let request = client.token_request(&credentials).unwrap();

        assert_eq!(*request.method(), reqwest::Method::POST);
        assert_eq!(
            request.url().as_str(),
            "https://zoom.us/oauth/token?grant_type=account_credentials&account_id=acct-42"
        );
        assert_eq!(request.headers()[AUTHORIZATION], "Basic aWQ6c2VjcmV0");
        assert_eq!(
            request.headers()[CONTENT_TYPE],
            "application/x-www-form-urlencoded"
        );
    }

    #[test]
    fn test_access_token_debug_hides_value() {
        let token = AccessToken::new("very-secret-token");
        assert_eq!(token.bearer(), "Bearer very-secret-token");
        assert!(!format!("{:?}", token).contains("very-secret-token"));
    }

    #[tokio::test]
    async fn test_acquire_token_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .and(query_param("grant_type", "account_credentials"))
            .and(query_param("account_id", "acct"))
            .and(header("authorization", "Basic aWQ6c2VjcmV0"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string(""))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "access_token": "T",
                "token_type": "bearer",
                "expires_in": 3599,
                "scope": "meeting:write:admin"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let token = client
            .acquire_token(&Credentials::new("id", "secret", "acct"))
            .await
            .unwrap();

        assert_eq!(token.as_str(), "T");
    }

    #[tokio::test]
    async fn test_acquire_token_rejected() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(
                ResponseTemplate::new(401).set_body_string(
                    r#"{"reason":"Invalid client_id or client_secret","error":"invalid_client"}"#,
                ),
            )
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .acquire_token(&Credentials::new("id", "wrong", "acct"))
            .await
            .unwrap_err();

        assert_eq!(err.0.status(), Some(StatusCode::UNAUTHORIZED));
        match err.0 {
            RequestError::Status { body, .. } => assert!(body.contains("invalid_client")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_acquire_token_without_access_token_field() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/oauth/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "token_type": "bearer"
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .acquire_token(&Credentials::new("id", "secret", "acct"))
            .await
            .unwrap_err();

        assert!(matches!(err.0, RequestError::Decode(_)));
    }

    #[tokio::test]
    async fn test_acquire_token_unreachable() {
        let client = ZoomClient::new(&ZoomConfig {
            auth_token_url: "http://127.0.0.1:1/oauth/token".to_string(),
            api_base_url: "http://127.0.0.1:1/v2".to_string(),
            request_timeout_secs: Some(5),
        })
        .unwrap();

        let err = client
            .acquire_token(&Credentials::new("id", "secret", "acct"))
            .await
            .unwrap_err();

        assert!(matches!(err.0, RequestError::Transport(_)));
    }
}
