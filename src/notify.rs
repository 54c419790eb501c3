//! Telegram digest notification.
//!
//! Formats the day's items into a plain-text numbered list and posts it
//! to a chat via the bot API. Delivery is part of the run's contract: a
//! send failure is fatal, not best-effort. The notifier only exists at
//! all when both credentials were configured.

use reqwest::Client;
use serde_json::json;
use std::time::Duration;
use tracing::{info, instrument};

use crate::config::NotifierConfig;
use crate::error::DigestError;
use crate::models::DigestDocument;
use crate::utils::truncate_to_bytes;

/// Telegram caps messages at 4096 characters; a byte budget of the
/// same size can only come in under that.
const MESSAGE_BYTE_BUDGET: usize = 4096;
const TRUNCATION_MARKER: &str = "\n…[truncated]";

/// Bullets shown per item in the message; the post file keeps them all.
const MAX_DIGEST_BULLETS: usize = 4;

/// Format the digest as a plain-text numbered list, truncated to the
/// message budget with a marker when it overflows.
pub fn format_digest(doc: &DigestDocument) -> String {
    let mut text = format!("AI news digest for {}\n", doc.date);
    for (i, item) in doc.items.iter().enumerate() {
        text.push_str(&format!("\n{}. {}\n{}\n", i + 1, item.title, item.dek));
        for bullet in item.bullets.iter().take(MAX_DIGEST_BULLETS) {
            text.push_str(&format!("- {bullet}\n"));
        }
        text.push_str(&format!("{}\n{}\n", item.take, item.source_url));
    }

    if text.len() > MESSAGE_BYTE_BUDGET {
        let cut = truncate_to_bytes(&text, MESSAGE_BYTE_BUDGET - TRUNCATION_MARKER.len());
        text = format!("{cut}{TRUNCATION_MARKER}");
    }
    text
}

/// Sends the digest to a Telegram chat.
pub struct TelegramNotifier {
    client: Client,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &NotifierConfig) -> Result<Self, DigestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(20))
            .build()?;
        Ok(Self {
            client,
            bot_token: config.bot_token.clone(),
            chat_id: config.chat_id.clone(),
        })
    }

    /// Send the formatted digest. Non-success responses are fatal.
    #[instrument(level = "info", skip_all, fields(items = doc.items.len()))]
    pub async fn send(&self, doc: &DigestDocument) -> Result<(), DigestError> {
        let text = format_digest(doc);
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);
        let body = json!({
            "chat_id": self.chat_id,
            "text": text,
            "disable_web_page_preview": true,
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DigestError::Notify(format!("telegram returned {status}: {body}")));
        }

        info!(chars = text.len(), "Digest sent");
        Ok(())
    }
}
