use std::fmt;
use std::time::Duration;

/// Runtime configuration for the node sync monitor.
#[derive(Clone)]
pub struct Config {
    /// JSON-RPC endpoint of the monitored node.
    pub node_url: String,

    pub bot_token: String,

    /// Bot API base URL, `None` for the public Telegram endpoint.
    pub telegram_api_url: Option<String>,

    /// How often the node is sampled.
    pub check_interval: Duration,

    /// Length of one reporting window. Always greater than `check_interval`.
    pub report_interval: Duration,

    /// Telegram chat that receives alerts.
    pub alert_chat_id: i64,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("node_url", &self.node_url)
            .field("bot_token", &"<redacted>")
            .field("telegram_api_url", &self.telegram_api_url)
            .field("check_interval", &self.check_interval)
            .field("report_interval", &self.report_interval)
            .field("alert_chat_id", &self.alert_chat_id)
            .finish()
    }
}
