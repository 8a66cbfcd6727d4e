use async_trait::async_trait;

use crate::node_client::SyncProgress;
use crate::types::MonitorError;

/// Something that can report a node's chain sync progress.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SyncSource: Send + Sync {
    /// `Ok(None)` means the node considers itself caught up with the chain head.
    async fn sync_progress(&self) -> Result<Option<SyncProgress>, MonitorError>;
}

/// Delivery channel for operator alerts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), MonitorError>;
}
