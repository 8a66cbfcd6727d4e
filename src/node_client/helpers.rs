use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::types::MonitorError;

use super::api_types::SyncProgress;

pub const SYNCING_METHOD: &str = "eth_syncing";

/// Decode an `eth_syncing` result: `false` when caught up, a progress object otherwise.
pub fn decode_sync_result(result: Value) -> Result<Option<SyncProgress>, MonitorError> {
    match result {
        Value::Bool(false) => Ok(None),
        Value::Object(_) => Ok(Some(serde_json::from_value(result)?)),
        other => Err(MonitorError::Node(format!(
            "{SYNCING_METHOD} returned {other}"
        ))),
    }
}

/// Deserialize a JSON-RPC quantity (`"0x1b4"`), tolerating plain numbers.
pub fn hex_quantity<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::String(text) => parse_quantity(&text).map_err(serde::de::Error::custom),
        Value::Number(number) => number
            .as_u64()
            .ok_or_else(|| serde::de::Error::custom(format!("invalid quantity {number}"))),
        Value::Null => Ok(0),
        other => Err(serde::de::Error::custom(format!(
            "invalid quantity {other}"
        ))),
    }
}

fn parse_quantity(text: &str) -> Result<u64, String> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .ok_or_else(|| format!("quantity {text:?} lacks 0x prefix"))?;
    if digits.is_empty() {
        return Err(format!("empty quantity {text:?}"));
    }
    u64::from_str_radix(digits, 16).map_err(|err| format!("invalid quantity {text:?}: {err}"))
}
