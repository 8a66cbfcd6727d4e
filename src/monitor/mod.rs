//! Debounced in-sync / out-of-sync alerting.
//!
//! A [`Sampler`] queries the node every check interval and counts the samples
//! where it reported itself fully synced. A [`Reporter`] closes a window every
//! report interval: zero synced samples raise an alert, a single synced sample
//! clears it. The two tasks share nothing but a [`SyncState`].

mod messages;
mod reporter;
mod sampler;
mod state;

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{error, info};

use crate::config::{format_duration, Config};
use crate::traits::{Notifier, SyncSource};
use crate::types::MonitorError;

pub use reporter::{AlertState, Reporter, Transition};
pub use sampler::{SampleOutcome, Sampler};
pub use state::{SyncSnapshot, SyncState, WindowSummary};

/// Timing and destination for a monitor.
#[derive(Debug, Clone, Copy)]
pub struct MonitorSettings {
    pub check_interval: Duration,
    pub report_interval: Duration,
    pub alert_chat_id: i64,
}

impl From<&Config> for MonitorSettings {
    fn from(config: &Config) -> Self {
        Self {
            check_interval: config.check_interval,
            report_interval: config.report_interval,
            alert_chat_id: config.alert_chat_id,
        }
    }
}

/// Wires a sync source and a notifier to a shared [`SyncState`].
pub struct SyncMonitor<S, N> {
    settings: MonitorSettings,
    sampler: Sampler<S>,
    reporter: Reporter<N>,
}

impl<S, N> SyncMonitor<S, N>
where
    S: SyncSource + 'static,
    N: Notifier,
{
    pub fn new(source: S, notifier: N, settings: MonitorSettings) -> Self {
        let state = Arc::new(SyncState::new());
        Self {
            settings,
            sampler: Sampler::new(source, Arc::clone(&state), settings.check_interval),
            reporter: Reporter::new(
                notifier,
                state,
                settings.alert_chat_id,
                settings.report_interval,
            ),
        }
    }

    /// Spawn the sampler and drive the reporter.
    ///
    /// Returns only when the sampler task dies. Dropping the future stops the
    /// sampler as well.
    pub async fn run(self) -> Result<(), MonitorError> {
        info!(
            check_interval = %format_duration(self.settings.check_interval),
            report_interval = %format_duration(self.settings.report_interval),
            alert_group = self.settings.alert_chat_id,
            "Starting sync monitor"
        );
        let mut sampler = AbortOnDrop(tokio::spawn(self.sampler.run()));
        tokio::select! {
            _ = self.reporter.run() => Ok(()),
            result = &mut sampler.0 => {
                let reason = match result {
                    Ok(()) => "exited".to_string(),
                    Err(err) => err.to_string(),
                };
                error!(reason = %reason, "Sampler task stopped");
                Err(MonitorError::Task(format!("sampler {reason}")))
            }
        }
    }
}

/// Aborts the wrapped task when dropped.
struct AbortOnDrop<T>(JoinHandle<T>);

impl<T> Drop for AbortOnDrop<T> {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Periodic ticker whose first tick fires one full period after creation.
/// Ticks missed while a previous one was still being handled are dropped.
fn ticker(period: Duration) -> Interval {
    let mut ticks = interval_at(Instant::now() + period, period);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticks
}
