use std::num::ParseIntError;

use thiserror::Error;

use crate::config::DurationError;

/// Errors raised while configuring or running the sync monitor.
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("missing required environment variable {0}")]
    MissingEnv(&'static str),

    #[error("invalid duration {value:?} in {key}: {source}")]
    InvalidDuration {
        key: &'static str,
        value: String,
        #[source]
        source: DurationError,
    },

    #[error("invalid alert group {value:?}: {source}")]
    InvalidAlertGroup {
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("report interval ({report}) must be greater than check interval ({check})")]
    IntervalOrder { check: String, report: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("node RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("unexpected node response: {0}")]
    Node(String),

    #[error("Telegram API error: {0}")]
    Telegram(String),

    #[error("background task stopped: {0}")]
    Task(String),

    #[error("failed to decode JSON: {0}")]
    Json(#[from] serde_json::Error),
}
