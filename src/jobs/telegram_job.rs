//! Telegram order-alert background job.
//!
//! Sends a short new-order notification to a Telegram chat via the Bot
//! API. Configured with `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`;
//! when either is missing the alert is logged instead of sent.

use serde::{Deserialize, Serialize};
use std::env;

use crate::errors::AppError;

/// Telegram alert job payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramJob {
    /// Message text (plain text, one order per message)
    pub text: String,
}

impl TelegramJob {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

struct TelegramConfig {
    bot_token: Option<String>,
    chat_id: Option<String>,
}

impl TelegramConfig {
    fn from_env() -> Self {
        Self {
            bot_token: env::var("TELEGRAM_BOT_TOKEN").ok(),
            chat_id: env::var("TELEGRAM_CHAT_ID").ok(),
        }
    }
}

/// Telegram job handler - posts the alert to the Bot API.
///
/// Returns an error on HTTP failure so the queue retries the job.
pub async fn telegram_job_handler(job: TelegramJob) -> Result<(), AppError> {
    let config = TelegramConfig::from_env();

    let (token, chat_id) = match (&config.bot_token, &config.chat_id) {
        (Some(token), Some(chat_id)) => (token, chat_id),
        _ => {
            // Development mode: log the alert instead of sending
            tracing::warn!("Telegram not configured - logging alert instead of sending");
            tracing::info!("=== TELEGRAM (not sent) ===\n{}\n===========================", job.text);
            return Ok(());
        }
    };

    let url = format!("https://api.telegram.org/bot{}/sendMessage", token);
    let client = reqwest::Client::new();

    let response = client
        .post(&url)
        .json(&serde_json::json!({
            "chat_id": chat_id,
            "text": job.text,
        }))
        .send()
        .await
        .map_err(|e| AppError::integration(format!("Telegram request failed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(AppError::integration(format!(
            "Telegram API returned {}: {}",
            status, body
        )));
    }

    tracing::info!("Telegram order alert delivered");
    Ok(())
}
