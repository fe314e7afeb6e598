use reqwest::Client;
use serde::Serialize;

use super::{MailError, OutboundEmail};
use crate::config::Config;

const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Clone)]
pub struct ResendMailer {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl ResendMailer {
    pub fn from_config(config: &Config) -> Result<Self, MailError> {
        let api_key = config
            .resend_api_key
            .clone()
            .ok_or_else(|| MailError::Api("RESEND_API_KEY missing in env".to_string()))?;

        Ok(Self::new(api_key, RESEND_ENDPOINT))
    }

    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    pub async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        #[derive(Serialize)]
        struct Payload<'a> {
            from: String,
            to: &'a [String],
            subject: &'a str,
            html: &'a str,
        }

        let payload = Payload {
            from: email.from_mailbox(),
            to: &email.to,
            subject: &email.subject,
            html: &email.body,
        };

        let res = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MailError::Api(format!("Mail send failed: {}", e)))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(MailError::Api(format!(
                "Resend API error ({}): {}",
                status, body
            )));
        }

        Ok(())
    }
}
