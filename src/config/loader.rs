use std::env;
use std::time::Duration;

use tracing::info;

use crate::types::MonitorError;

use super::{format_duration, parse_duration, Config};

const NODE_URL_VAR: &str = "GETH_URL";
const BOT_TOKEN_VAR: &str = "BOT_TOKEN";
const TELEGRAM_API_URL_VAR: &str = "TELEGRAM_API_URL";
const CHECK_INTERVAL_VAR: &str = "CHECK_INTERVAL";
const REPORT_INTERVAL_VAR: &str = "REPORT_INTERVAL";
const ALERT_GROUP_VAR: &str = "ALERT_GROUP";

impl Config {
    /// Load and validate configuration from the process environment.
    pub fn from_env() -> Result<Self, MonitorError> {
        let config = Self::from_lookup(|key| env::var(key).ok())?;
        info!(
            node = %config.node_url,
            check_interval = %format_duration(config.check_interval),
            report_interval = %format_duration(config.report_interval),
            alert_group = config.alert_chat_id,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Build a configuration from an arbitrary variable source.
    /// Every rule is checked here so nothing starts with a bad config.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MonitorError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let node_url = required(&lookup, NODE_URL_VAR)?;
        let bot_token = required(&lookup, BOT_TOKEN_VAR)?;
        let telegram_api_url = lookup(TELEGRAM_API_URL_VAR)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let check_interval = duration_var(&lookup, CHECK_INTERVAL_VAR)?;
        let report_interval = duration_var(&lookup, REPORT_INTERVAL_VAR)?;
        if check_interval.is_zero() {
            return Err(MonitorError::Config(format!(
                "{CHECK_INTERVAL_VAR} must be positive"
            )));
        }
        if report_interval <= check_interval {
            return Err(MonitorError::IntervalOrder {
                check: format_duration(check_interval),
                report: format_duration(report_interval),
            });
        }

        let raw_group = required(&lookup, ALERT_GROUP_VAR)?;
        let alert_chat_id = raw_group
            .parse::<i64>()
            .map_err(|source| MonitorError::InvalidAlertGroup {
                value: raw_group.clone(),
                source,
            })?;

        Ok(Self {
            node_url,
            bot_token,
            telegram_api_url,
            check_interval,
            report_interval,
            alert_chat_id,
        })
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, MonitorError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(MonitorError::MissingEnv(key)),
    }
}

fn duration_var<F>(lookup: &F, key: &'static str) -> Result<Duration, MonitorError>
where
    F: Fn(&str) -> Option<String>,
{
    let value = lookup(key).unwrap_or_default();
    parse_duration(value.trim()).map_err(|source| MonitorError::InvalidDuration {
        key,
        value,
        source,
    })
}
