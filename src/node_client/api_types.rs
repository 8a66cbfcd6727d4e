use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::helpers::hex_quantity;

/// Chain sync progress reported by a node that is still catching up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SyncProgress {
    #[serde(default, rename = "startingBlock", deserialize_with = "hex_quantity")]
    pub starting_block: u64,
    #[serde(default, rename = "currentBlock", deserialize_with = "hex_quantity")]
    pub current_block: u64,
    #[serde(default, rename = "highestBlock", deserialize_with = "hex_quantity")]
    pub highest_block: u64,
}

#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: Vec<Value>,
}

impl<'a> RpcRequest<'a> {
    pub fn new(id: u64, method: &'a str) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}
