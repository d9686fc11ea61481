//! Twilio API client implementation.

use reqwest::Client;
use std::time::Duration;

use super::types::{Call, Message, TwilioErrorResponse};

/// Error type for Twilio operations.
#[derive(Debug, thiserror::Error)]
pub enum TwilioError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Twilio API returned an error.
    #[error("Twilio API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Twilio error code.
        code: Option<i64>,
        /// Error message.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Twilio REST API client.
#[derive(Debug, Clone)]
pub struct TwilioClient {
    client: Client,
    base_url: String,
    account_sid: String,
    auth_token: String,
    from_number: String,
}

impl TwilioClient {
    /// Twilio API base URL.
    pub const BASE_URL: &'static str = "https://api.twilio.com/2010-04-01";

    /// Create a new Twilio client.
    ///
    /// # Arguments
    ///
    /// * `account_sid` - Account SID (`AC...`)
    /// * `auth_token` - Account auth token
    /// * `from_number` - Caller id used for outbound calls and messages
    pub fn new(
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
    ) -> Result<Self, TwilioError> {
        Self::with_base_url(Self::BASE_URL, account_sid, auth_token, from_number)
    }

    /// Create a client against a different API host (used by tests).
    pub fn with_base_url(
        base_url: impl Into<String>,
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
        from_number: impl Into<String>,
    ) -> Result<Self, TwilioError> {
        let from_number = from_number.into();
        if from_number.trim().is_empty() {
            return Err(TwilioError::Configuration(
                "a sending phone number is required".into(),
            ));
        }

        let client = Client::builder().timeout(Duration::from_secs(15)).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            from_number,
        })
    }

    /// Send an SMS.
    pub async fn send_sms(&self, to: &str, body: &str) -> Result<Message, TwilioError> {
        let params = [("To", to), ("From", self.from_number.as_str()), ("Body", body)];

        let response = self
            .client
            .post(self.account_url("Messages.json"))
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Place an outbound call that executes the given TwiML document.
    pub async fn create_call(&self, to: &str, twiml: &str) -> Result<Call, TwilioError> {
        let params = [("To", to), ("From", self.from_number.as_str()), ("Twiml", twiml)];

        let response = self
            .client
            .post(self.account_url("Calls.json"))
            .basic_auth(&self.account_sid, Some(&self.auth_token))
            .form(&params)
            .send()
            .await?;

        self.handle_response(response).await
    }

    fn account_url(&self, resource: &str) -> String {
        format!(
            "{}/Accounts/{}/{resource}",
            self.base_url, self.account_sid
        )
    }

    /// Handle API response and parse JSON or error.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, TwilioError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        match response.json::<TwilioErrorResponse>().await {
            Ok(error) => Err(TwilioError::Api {
                status: status.as_u16(),
                code: error.code,
                message: error.message,
            }),
            Err(_) => Err(TwilioError::Api {
                status: status.as_u16(),
                code: None,
                message: format!("HTTP {status}"),
            }),
        }
    }
}
