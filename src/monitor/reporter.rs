use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::traits::Notifier;

use super::messages::{self, BACK_IN_SYNC};
use super::state::{SyncState, WindowSummary};
use super::ticker;

/// Whether an out-of-sync alert is currently raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertState {
    #[default]
    InSync,
    OutOfSync,
}

/// A change of [`AlertState`] that must be announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    BackInSync,
    OutOfSync,
}

impl AlertState {
    /// Decide the transition for a closed window.
    ///
    /// | synced samples | state | result |
    /// |----------------|-------|--------|
    /// | > 0 | OutOfSync | `BackInSync` |
    /// | 0 | InSync | `OutOfSync` |
    /// | > 0 | InSync | none |
    /// | 0 | OutOfSync | none |
    pub fn next(self, synced_samples: u64) -> Option<Transition> {
        match (self, synced_samples > 0) {
            (AlertState::OutOfSync, true) => Some(Transition::BackInSync),
            (AlertState::InSync, false) => Some(Transition::OutOfSync),
            (AlertState::InSync, true) | (AlertState::OutOfSync, false) => None,
        }
    }
}

impl Transition {
    pub fn target(self) -> AlertState {
        match self {
            Transition::BackInSync => AlertState::InSync,
            Transition::OutOfSync => AlertState::OutOfSync,
        }
    }
}

/// Closes a reporting window on every tick and announces state changes.
pub struct Reporter<N> {
    notifier: N,
    state: Arc<SyncState>,
    alert_chat_id: i64,
    interval: Duration,
    alert: AlertState,
    out_of_sync_since: Option<DateTime<Utc>>,
}

impl<N: Notifier> Reporter<N> {
    pub fn new(notifier: N, state: Arc<SyncState>, alert_chat_id: i64, interval: Duration) -> Self {
        Self {
            notifier,
            state,
            alert_chat_id,
            interval,
            alert: AlertState::default(),
            out_of_sync_since: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn alert_state(&self) -> AlertState {
        self.alert
    }

    /// Handle one reporting tick. The counter is reset whatever the outcome,
    /// and the alert state advances even when delivery fails.
    pub async fn report_once(&mut self) -> Option<Transition> {
        let window = self.state.close_window();
        debug!(synced_samples = window.synced_samples, "Closed reporting window");

        let transition = self.alert.next(window.synced_samples)?;
        let text = self.announce(transition, window);
        if let Err(err) = self.notifier.send_message(self.alert_chat_id, &text).await {
            warn!(error = %err, chat_id = self.alert_chat_id, "Error sending message");
        }
        self.alert = transition.target();
        Some(transition)
    }

    /// Report forever, one window per tick.
    pub async fn run(mut self) {
        let mut ticks = ticker(self.interval);
        loop {
            ticks.tick().await;
            self.report_once().await;
        }
    }

    fn announce(&mut self, transition: Transition, window: WindowSummary) -> String {
        match transition {
            Transition::BackInSync => {
                let now = Utc::now();
                let outage_secs = self
                    .out_of_sync_since
                    .take()
                    .map(|since| now.signed_duration_since(since).num_seconds())
                    .unwrap_or_default();
                info!(
                    synced_samples = window.synced_samples,
                    outage_secs,
                    "Node is back in sync"
                );
                BACK_IN_SYNC.to_string()
            }
            Transition::OutOfSync => {
                let (current, highest) = messages::block_figures(window.snapshot);
                let since = Utc::now();
                self.out_of_sync_since = Some(since);
                info!(
                    current_block = %current,
                    highest_block = %highest,
                    since = %since.to_rfc3339(),
                    "Node is out of sync"
                );
                messages::out_of_sync(window.snapshot, self.interval)
            }
        }
    }
}
