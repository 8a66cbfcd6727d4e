use serde::{Deserialize, Serialize};

/// Envelope returned by every Bot API method.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub error_code: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Human-readable failure reason for an `ok: false` response.
    pub fn failure(&self) -> String {
        let description = self.description.as_deref().unwrap_or("no description");
        match self.error_code {
            Some(code) => format!("{code} {description}"),
            None => description.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BotUser {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SentMessage {
    pub message_id: i64,
}

#[derive(Debug, Serialize)]
pub struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
}
