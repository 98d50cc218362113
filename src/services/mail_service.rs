//! Transactional email delivery through the Resend HTTP API.
//!
//! Delivery is a thin passthrough: failures are logged and never fail the
//! request that triggered the email.

use log::{debug, warn};
use serde::Serialize;

use crate::config::CONFIG;
use crate::utils::mask_email;

#[derive(Debug, Serialize)]
struct SendMailPayload<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: &'a str,
}

/// Service for sending transactional email.
pub struct MailService {
    http: reqwest::Client,
    api_key: String,
    from: String,
}

impl MailService {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: CONFIG.resend_api_key.clone(),
            from: CONFIG.mail_from.clone(),
        }
    }

    /// Send an email, best-effort.
    pub async fn send(&self, to: &str, subject: &str, html: &str) {
        if self.api_key.is_empty() {
            debug!("Mail API key not configured, skipping email to {}", mask_email(to));
            return;
        }

        let payload = SendMailPayload {
            from: &self.from,
            to: [to],
            subject,
            html,
        };

        let result = self
            .http
            .post("https://api.resend.com/emails")
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await;

        match result {
            Ok(resp) if resp.status().is_success() => {
                debug!("Email '{}' sent to {}", subject, mask_email(to));
            }
            Ok(resp) => {
                warn!(
                    "Email to {} rejected with status {}",
                    mask_email(to),
                    resp.status()
                );
            }
            Err(e) => {
                warn!("Failed to send email to {}: {}", mask_email(to), e);
            }
        }
    }
}

impl Default for MailService {
    fn default() -> Self {
        Self::new()
    }
}
