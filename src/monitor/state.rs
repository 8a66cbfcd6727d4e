use std::sync::{Mutex, MutexGuard, PoisonError};

/// Last observed node status. Failed samples leave it untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncSnapshot {
    /// No successful sample yet.
    #[default]
    Unknown,
    Synced,
    Syncing {
        current_block: u64,
        highest_block: u64,
    },
}

/// Snapshot of one closed reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSummary {
    pub synced_samples: u64,
    pub snapshot: SyncSnapshot,
}

#[derive(Debug, Default)]
struct Window {
    synced_samples: u64,
    snapshot: SyncSnapshot,
}

/// State shared by the sampler and the reporter.
///
/// Every operation takes the lock for its own duration only, so callers
/// never hold it across a node query or a notification.
#[derive(Debug, Default)]
pub struct SyncState {
    window: Mutex<Window>,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a sample where the node reported itself fully synced.
    pub fn record_synced(&self) {
        let mut window = self.lock();
        window.synced_samples = window.synced_samples.saturating_add(1);
        window.snapshot = SyncSnapshot::Synced;
    }

    /// Record a sample where the node is still catching up.
    pub fn record_syncing(&self, current_block: u64, highest_block: u64) {
        self.lock().snapshot = SyncSnapshot::Syncing {
            current_block,
            highest_block,
        };
    }

    #[cfg(test)]
    pub(crate) fn synced_samples(&self) -> u64 {
        self.lock().synced_samples
    }

    #[cfg(test)]
    pub(crate) fn snapshot(&self) -> SyncSnapshot {
        self.lock().snapshot
    }

    /// Close the current window: read the synced counter, reset it to zero
    /// and capture the snapshot, all under one lock acquisition.
    pub fn close_window(&self) -> WindowSummary {
        let mut window = self.lock();
        let synced_samples = std::mem::take(&mut window.synced_samples);
        WindowSummary {
            synced_samples,
            snapshot: window.snapshot,
        }
    }

    // The guarded data is two plain values, always consistent after any write.
    fn lock(&self) -> MutexGuard<'_, Window> {
        self.window.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
