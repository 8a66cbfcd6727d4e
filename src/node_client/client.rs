use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::debug;

use crate::traits::SyncSource;
use crate::types::MonitorError;

use super::api_types::{RpcRequest, RpcResponse, SyncProgress};
use super::helpers::{decode_sync_result, SYNCING_METHOD};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-RPC client for an Ethereum execution node.
pub struct NodeClient {
    http: Client,
    url: Url,
    next_id: AtomicU64,
}

impl NodeClient {
    /// Validate the endpoint and prepare an HTTP client. Does not contact the node.
    pub fn connect(endpoint: &str) -> Result<Self, MonitorError> {
        let url = Url::parse(endpoint.trim()).map_err(|err| {
            MonitorError::Config(format!("Invalid node URL {endpoint:?}: {err}"))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(MonitorError::Config(format!(
                "Unsupported node URL scheme {:?}, expected http or https",
                url.scheme()
            )));
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(MonitorError::Http)?;

        Ok(Self {
            http,
            url,
            next_id: AtomicU64::new(1),
        })
    }

    /// Query `eth_syncing`. `None` means the node is caught up.
    pub async fn query_sync_progress(&self) -> Result<Option<SyncProgress>, MonitorError> {
        let result = self.call(SYNCING_METHOD).await?;
        decode_sync_result(result)
    }

    async fn call(&self, method: &str) -> Result<Value, MonitorError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = RpcRequest::new(id, method);
        debug!(method, id, "Sending JSON-RPC request");

        let response = self
            .http
            .post(self.url.clone())
            .json(&request)
            .send()
            .await
            .map_err(MonitorError::Http)?;

        if !response.status().is_success() {
            return Err(MonitorError::Node(format!(
                "{} returned {}",
                method,
                response.status()
            )));
        }

        let body: RpcResponse = response.json().await.map_err(MonitorError::Http)?;
        if let Some(error) = body.error {
            return Err(MonitorError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        body.result
            .ok_or_else(|| MonitorError::Node(format!("{method} response has no result")))
    }
}

#[async_trait]
impl SyncSource for NodeClient {
    async fn sync_progress(&self) -> Result<Option<SyncProgress>, MonitorError> {
        self.query_sync_progress().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_endpoints() {
        assert!(NodeClient::connect("http://127.0.0.1:8545").is_ok());
        assert!(NodeClient::connect("https://rpc.example.org/").is_ok());
    }

    #[test]
    fn rejects_unsupported_endpoints() {
        assert!(matches!(
            NodeClient::connect("ws://127.0.0.1:8546"),
            Err(MonitorError::Config(_))
        ));
        assert!(matches!(
            NodeClient::connect("/var/run/geth.ipc"),
            Err(MonitorError::Config(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_node_is_an_error() {
        // Port 0 never accepts connections.
        let client = NodeClient::connect("http://127.0.0.1:0").unwrap();
        assert!(matches!(
            client.query_sync_progress().await,
            Err(MonitorError::Http(_))
        ));
    }
}
