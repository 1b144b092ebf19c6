//! Resend email API client
//!
//! Covers the single call the showroom makes: send one HTML email. The
//! free-tier `onboarding@resend.dev` sender works without domain
//! verification, which is what the default configuration uses.

use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.resend.com";

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Connection(String),

    #[error("Resend returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("response decode failed: {0}")]
    Decode(String),
}

/// One outgoing email, serialized as the `/emails` request body.
#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendResponse {
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl Client {
    pub fn new(api_key: &str) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point at a different endpoint, for tests and self-hosted relays.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub async fn send(&self, message: &EmailMessage) -> Result<SendResponse> {
        let response = self
            .http
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(&self.api_key)
            .json(message)
            .send()
            .await
            .map_err(|e| Error::Connection(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Status {
                status: status.as_u16(),
                body,
            });
        }

        let sent: SendResponse = response
            .json()
            .await
            .map_err(|e| Error::Decode(e.to_string()))?;
        tracing::info!("email sent, id {}", sent.id);
        Ok(sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_wire_shape() {
        let message = EmailMessage {
            from: "Auto Dealership <onboarding@resend.dev>".to_string(),
            to: vec!["customer@example.com".to_string()],
            subject: "Appointment Confirmation".to_string(),
            html: "<h1>Confirmed</h1>".to_string(),
        };

        let body = serde_json::to_value(&message).expect("serializes");
        assert_eq!(body["from"], "Auto Dealership <onboarding@resend.dev>");
        assert_eq!(body["to"][0], "customer@example.com");
        assert_eq!(body["subject"], "Appointment Confirmation");
        assert_eq!(body["html"], "<h1>Confirmed</h1>");
    }

    #[test]
    fn test_send_response_parses() {
        let response: SendResponse =
            serde_json::from_str(r#"{"id":"49a3999c-0ce1-4ea6-ab68-afcd6dc2e794"}"#)
                .expect("parses");
        assert_eq!(response.id, "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794");
    }

    #[test]
    fn test_base_url_override_trims_slash() {
        let client = Client::new("key").with_base_url("http://127.0.0.1:9999/");
        assert_eq!(client.base_url, "http://127.0.0.1:9999");
    }
}
