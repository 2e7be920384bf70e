//! Slack webhook notification adapter.
//!
//! Delivery is best effort: a missing webhook disables the channel, and
//! delivery failures are logged, never propagated.

use chrono::Utc;
use econodoc::{Notifier, Severity};
use log::{debug, warn};
use reqwest::blocking::Client;
use serde_json::json;
use std::time::Duration;

/// Notifier posting to a Slack incoming webhook.
pub struct SlackNotifier {
    webhook_url: Option<String>,
    http: Client,
}

impl SlackNotifier {
    /// Create a notifier. `None` disables delivery entirely.
    pub fn new(webhook_url: Option<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_default();
        Self { webhook_url, http }
    }
}

impl Notifier for SlackNotifier {
    fn notify(&self, service: &str, message: &str, severity: Severity) {
        let Some(url) = &self.webhook_url else {
            debug!("no webhook configured, skipping notification");
            return;
        };

        let payload = json!({
            "text": format!(
                "{} *{}*\n{}\n_time: {}_",
                severity.emoji(),
                service,
                message,
                Utc::now().to_rfc3339(),
            )
        });

        match self.http.post(url).json(&payload).send() {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => warn!("slack returned {}", response.status()),
            Err(e) => warn!("slack delivery failed: {}", e),
        }
    }
}
