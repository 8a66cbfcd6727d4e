use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::traits::SyncSource;

use super::state::SyncState;
use super::ticker;

/// What a single sample observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleOutcome {
    Synced,
    Syncing,
    /// The query failed; nothing was recorded.
    Unknown,
}

/// Polls the node on the check interval and feeds [`SyncState`].
pub struct Sampler<S> {
    source: S,
    state: Arc<SyncState>,
    interval: Duration,
}

impl<S: SyncSource> Sampler<S> {
    pub fn new(source: S, state: Arc<SyncState>, interval: Duration) -> Self {
        Self {
            source,
            state,
            interval,
        }
    }

    pub async fn sample_once(&self) -> SampleOutcome {
        match self.source.sync_progress().await {
            Ok(None) => {
                self.state.record_synced();
                debug!("Node is fully synced");
                SampleOutcome::Synced
            }
            Ok(Some(progress)) => {
                self.state
                    .record_syncing(progress.current_block, progress.highest_block);
                debug!(
                    current_block = progress.current_block,
                    highest_block = progress.highest_block,
                    "Node is syncing"
                );
                SampleOutcome::Syncing
            }
            Err(err) => {
                warn!(error = %err, "Error while checking sync status");
                SampleOutcome::Unknown
            }
        }
    }

    /// Sample forever, one query per tick.
    pub async fn run(self) {
        let mut ticks = ticker(self.interval);
        loop {
            ticks.tick().await;
            self.sample_once().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::monitor::state::SyncSnapshot;
    use crate::node_client::SyncProgress;
    use crate::traits::MockSyncSource;
    use crate::types::MonitorError;

    use super::*;

    fn sampler_with(source: MockSyncSource) -> (Sampler<MockSyncSource>, Arc<SyncState>) {
        let state = Arc::new(SyncState::new());
        let sampler = Sampler::new(source, Arc::clone(&state), Duration::from_secs(1));
        (sampler, state)
    }

    #[tokio::test]
    async fn synced_node_increments_counter() {
        let mut source = MockSyncSource::new();
        source.expect_sync_progress().times(2).returning(|| Ok(None));
        let (sampler, state) = sampler_with(source);

        assert_eq!(sampler.sample_once().await, SampleOutcome::Synced);
        assert_eq!(sampler.sample_once().await, SampleOutcome::Synced);
        assert_eq!(state.synced_samples(), 2);
        assert_eq!(state.snapshot(), SyncSnapshot::Synced);
    }

    #[tokio::test]
    async fn syncing_node_updates_snapshot_without_counting() {
        let mut source = MockSyncSource::new();
        source.expect_sync_progress().times(1).returning(|| {
            Ok(Some(SyncProgress {
                starting_block: 0,
                current_block: 100,
                highest_block: 200,
            }))
        });
        let (sampler, state) = sampler_with(source);

        assert_eq!(sampler.sample_once().await, SampleOutcome::Syncing);
        assert_eq!(state.synced_samples(), 0);
        assert_eq!(
            state.snapshot(),
            SyncSnapshot::Syncing {
                current_block: 100,
                highest_block: 200
            }
        );
    }

    #[tokio::test]
    async fn failed_query_keeps_last_known_state() {
        let mut source = MockSyncSource::new();
        let mut seq = mockall::Sequence::new();
        source
            .expect_sync_progress()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| {
                Ok(Some(SyncProgress {
                    starting_block: 0,
                    current_block: 42,
                    highest_block: 50,
                }))
            });
        source
            .expect_sync_progress()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(MonitorError::Node("connection reset".to_string())));
        let (sampler, state) = sampler_with(source);

        sampler.sample_once().await;
        assert_eq!(sampler.sample_once().await, SampleOutcome::Unknown);
        assert_eq!(state.synced_samples(), 0);
        assert_eq!(
            state.snapshot(),
            SyncSnapshot::Syncing {
                current_block: 42,
                highest_block: 50
            }
        );
    }
}
