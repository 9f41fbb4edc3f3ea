// Discord webhook delivery. One POST per alert, no retry; a failed
// attempt is reported to the caller and dropped.

use crate::models::AlertEvent;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("webhook returned status {0}")]
    Status(reqwest::StatusCode),
    #[error("webhook request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Discord webhook body: a single embed per alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub embeds: Vec<Embed>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
    /// ISO-8601 UTC.
    pub timestamp: String,
    pub footer: EmbedFooter,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedFooter {
    pub text: String,
}

pub struct NotificationDispatcher {
    client: reqwest::Client,
    webhook_url: String,
    server_name: String,
}

impl NotificationDispatcher {
    pub fn new(
        webhook_url: String,
        server_name: String,
        request_timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            client,
            webhook_url,
            server_name,
        })
    }

    /// Renders the alert into the embed payload sent to the sink.
    pub fn build_payload(&self, event: &AlertEvent) -> WebhookPayload {
        let sample = &event.sample;
        let label = sample.kind.label();
        WebhookPayload {
            embeds: vec![Embed {
                title: format!("Warning: {} High Usage on {}", label, self.server_name),
                description: format!("{} usage has exceeded {:.1}%!", label, event.threshold),
                color: sample.kind.color(),
                fields: vec![
                    EmbedField {
                        name: "Current Usage".into(),
                        value: format!("{:.1}%", sample.usage_percent),
                        inline: true,
                    },
                    EmbedField {
                        name: "Threshold".into(),
                        value: format!("{:.1}%", event.threshold),
                        inline: true,
                    },
                    EmbedField {
                        name: "Used".into(),
                        value: sample.used_display(),
                        inline: true,
                    },
                    EmbedField {
                        name: "Total".into(),
                        value: sample.total_display(),
                        inline: true,
                    },
                ],
                timestamp: sample
                    .sampled_at
                    .to_rfc3339_opts(SecondsFormat::Millis, true),
                footer: EmbedFooter {
                    text: "Server Monitor • powered by sysinfo".into(),
                },
            }],
        }
    }

    /// One delivery attempt for one event. Non-2xx and transport errors both
    /// come back as `Err`; the caller logs and moves on.
    pub async fn dispatch(&self, event: &AlertEvent) -> Result<(), DispatchError> {
        let payload = self.build_payload(event);
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(DispatchError::Status(response.status()));
        }
        tracing::info!(
            resource = event.sample.kind.label(),
            usage_percent = event.sample.usage_percent,
            "webhook alert sent"
        );
        Ok(())
    }
}
