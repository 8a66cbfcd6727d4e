use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info};

use crate::traits::Notifier;
use crate::types::MonitorError;

use super::api_types::{ApiResponse, BotUser, SendMessageRequest, SentMessage};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";
const GET_TIMEOUT: Duration = Duration::from_secs(5);
const POST_TIMEOUT: Duration = Duration::from_secs(20);

/// Minimal Telegram Bot API client used to deliver alerts.
pub struct TelegramBot {
    http: Client,
    api_url: String,
    token: String,
}

impl TelegramBot {
    /// Build a client and verify the token with `getMe`.
    pub async fn connect(token: &str, api_url: Option<&str>) -> Result<Self, MonitorError> {
        let bot = Self::new(token, api_url)?;
        let me: BotUser = bot.get("getMe").await?;
        info!(
            bot_id = me.id,
            username = me.username.as_deref().unwrap_or("<none>"),
            "Telegram bot authorized"
        );
        Ok(bot)
    }

    fn new(token: &str, api_url: Option<&str>) -> Result<Self, MonitorError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(MonitorError::Config("Telegram bot token is empty".to_string()));
        }

        let http = Client::builder().build().map_err(MonitorError::Http)?;

        Ok(Self {
            http,
            api_url: api_url
                .unwrap_or(DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            token: token.to_string(),
        })
    }

    pub async fn send_text(&self, chat_id: i64, text: &str) -> Result<i64, MonitorError> {
        let request = SendMessageRequest { chat_id, text };
        let sent: SentMessage = self.post("sendMessage", &request).await?;
        debug!(chat_id, message_id = sent.message_id, "Telegram message delivered");
        Ok(sent.message_id)
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    async fn get<T>(&self, method: &str) -> Result<T, MonitorError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .http
            .get(self.method_url(method))
            .timeout(GET_TIMEOUT)
            .send()
            .await
            .map_err(redact)?;
        decode(method, response).await
    }

    async fn post<T, B>(&self, method: &str, body: &B) -> Result<T, MonitorError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .http
            .post(self.method_url(method))
            .timeout(POST_TIMEOUT)
            .json(body)
            .send()
            .await
            .map_err(redact)?;
        decode(method, response).await
    }
}

#[async_trait]
impl Notifier for TelegramBot {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), MonitorError> {
        self.send_text(chat_id, text).await.map(|_| ())
    }
}

/// Bot API errors arrive with non-2xx statuses but still carry a JSON envelope,
/// so the body is decoded before the status is considered.
async fn decode<T>(method: &str, response: reqwest::Response) -> Result<T, MonitorError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    let envelope: ApiResponse<T> = response.json().await.map_err(|err| {
        MonitorError::Telegram(format!("{method} returned {status}: {}", err.without_url()))
    })?;

    if !envelope.ok {
        return Err(MonitorError::Telegram(format!(
            "{method} failed: {}",
            envelope.failure()
        )));
    }
    envelope
        .result
        .ok_or_else(|| MonitorError::Telegram(format!("{method} response has no result")))
}

// Request URLs embed the bot token.
fn redact(err: reqwest::Error) -> MonitorError {
    MonitorError::Http(err.without_url())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_token() {
        assert!(matches!(
            TelegramBot::new("   ", None),
            Err(MonitorError::Config(_))
        ));
    }

    #[test]
    fn builds_method_urls() {
        let bot = TelegramBot::new("123:abc", None).unwrap();
        assert_eq!(
            bot.method_url("sendMessage"),
            "https://api.telegram.org/bot123:abc/sendMessage"
        );

        let bot = TelegramBot::new("123:abc", Some("http://localhost:8081/")).unwrap();
        assert_eq!(bot.method_url("getMe"), "http://localhost:8081/bot123:abc/getMe");
    }

    #[tokio::test]
    async fn transport_errors_hide_the_token() {
        let bot = TelegramBot::new("123:topsecret", Some("http://127.0.0.1:0")).unwrap();
        let err = bot.send_text(1, "hello").await.unwrap_err();
        assert!(matches!(err, MonitorError::Http(_)));
        assert!(!err.to_string().contains("topsecret"));
    }
}
