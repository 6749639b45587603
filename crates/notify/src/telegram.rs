use async_trait::async_trait;
use shingo_core::notify::error::NotifyError;
use shingo_core::notify::port::Notifier;
use reqwest;
use serde::Serialize;

/// # Summary
/// A notifier implementation that fans a message out to a list of
/// Telegram chats via the Bot API.
///
/// # Invariants
/// * `bot_token` must be valid.
/// * Every chat id in `chat_ids` must be accessible by the bot.
/// * Delivery succeeds only when every recipient received the message;
///   per-chat failures are collected and reported together.
pub struct TelegramNotifier {
    /// The Bot API token.
    bot_token: String,
    /// The target chat IDs (one message per chat).
    chat_ids: Vec<String>,
    /// The HTTP client used for requests.
    client: reqwest::Client,
}

/// # Summary
/// Payload structure for Telegram `sendMessage` API.
#[derive(Serialize)]
struct TelegramMessage {
    chat_id: String,
    text: String,
    parse_mode: String,
}

impl TelegramNotifier {
    /// # Summary
    /// Creates a new `TelegramNotifier`.
    ///
    /// # Invariants
    /// * None.
    ///
    /// # Logic
    /// Initializes the struct with provided credentials and a default HTTP client.
    ///
    /// # Arguments
    /// * `bot_token` - The Telegram Bot API token.
    /// * `chat_ids` - The chat IDs to deliver each message to.
    ///
    /// # Returns
    /// * A new instance of `TelegramNotifier`.
    pub fn new(bot_token: String, chat_ids: Vec<String>) -> Self {
        Self {
            bot_token,
            chat_ids,
            client: reqwest::Client::new(),
        }
    }

    /// # Summary
    /// Delivers one message to a single chat.
    ///
    /// # Logic
    /// 1. Sends a POST request to the `sendMessage` endpoint.
    /// 2. Maps transport failures to `NotifyError::Network` and non-success
    ///    API responses to `NotifyError::Platform`.
    async fn send_to_chat(&self, chat_id: &str, text: &str) -> Result<(), NotifyError> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);

        let payload = TelegramMessage {
            chat_id: chat_id.to_string(),
            text: text.to_string(),
            parse_mode: "Markdown".to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(NotifyError::Platform(format!(
                "Telegram API error: {}",
                error_text
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    /// # Summary
    /// Sends a notification to every configured Telegram chat.
    ///
    /// # Invariants
    /// * Success means all recipients were delivered to, not just the last
    ///   one attempted.
    ///
    /// # Logic
    /// 1. Rejects an empty recipient list as a configuration error.
    /// 2. Formats the message with a bold subject and the content.
    /// 3. Delivers to each chat in turn, continuing past individual failures.
    /// 4. Reports all failed chats in a single `NotifyError::Platform`.
    ///
    /// # Arguments
    /// * `subject` - The subject of the notification (formatted as bold).
    /// * `content` - The main content of the notification.
    ///
    /// # Returns
    /// * `Ok(())` if the message reached every chat.
    /// * `Err(NotifyError)` if the recipient list is empty or any delivery failed.
    async fn notify(&self, subject: &str, content: &str) -> Result<(), NotifyError> {
        if self.chat_ids.is_empty() {
            return Err(NotifyError::Config("No Telegram chat ids configured".into()));
        }

        // Simple formatting: Bold subject + newline + content
        let text = format!("*{}*\n{}", subject, content);

        let mut failures = Vec::new();
        for chat_id in &self.chat_ids {
            if let Err(e) = self.send_to_chat(chat_id, &text).await {
                failures.push(format!("{}: {}", chat_id, e));
            }
        }

        if !failures.is_empty() {
            return Err(NotifyError::Platform(format!(
                "Delivery failed for {}/{} chats: {}",
                failures.len(),
                self.chat_ids.len(),
                failures.join("; ")
            )));
        }

        Ok(())
    }
}
