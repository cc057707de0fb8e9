//! HTTP mail relay provider

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use tpcm_shared::utils::validation::mask_email;
use tpcm_shared::EmailConfig;

use super::email_service::{EmailMessage, EmailService};
use crate::InfrastructureError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelayResponse {
    #[serde(alias = "id", alias = "message_id")]
    message_id: Option<String>,
}

/// Sends mail by POSTing `{from, to, subject, text}` to a relay endpoint
pub struct RelayEmailService {
    client: Client,
    url: String,
    api_key: Option<String>,
    from_address: String,
}

impl RelayEmailService {
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let url = config
            .relay_url
            .clone()
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| InfrastructureError::Config("EMAIL_RELAY_URL not set".to_string()))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        tracing::info!(relay_url = %url, "Email relay initialized");

        Ok(Self {
            client,
            url,
            api_key: config.api_key.clone(),
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl EmailService for RelayEmailService {
    async fn send(&self, message: &EmailMessage) -> Result<String, InfrastructureError> {
        let mut request = self.client.post(&self.url).json(&json!({
            "from": self.from_address,
            "to": message.to,
            "subject": message.subject,
            "text": message.body,
        }));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                to = %mask_email(&message.to),
                status = status.as_u16(),
                "Email relay refused message"
            );
            return Err(InfrastructureError::Email(format!(
                "relay returned {}: {}",
                status.as_u16(),
                body.trim()
            )));
        }

        let parsed: Option<RelayResponse> = response.json().await.ok();
        let message_id = parsed
            .and_then(|r| r.message_id)
            .unwrap_or_else(|| "relay-accepted".to_string());

        tracing::debug!(
            to = %mask_email(&message.to),
            message_id = %message_id,
            "Email handed to relay"
        );
        Ok(message_id)
    }

    fn provider_name(&self) -> &str {
        "relay"
    }
}
