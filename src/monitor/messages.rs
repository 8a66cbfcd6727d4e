use std::fmt::Write;
use std::time::Duration;

use crate::config::format_duration;

use super::state::SyncSnapshot;

pub const BACK_IN_SYNC: &str = "🟢 your node is back in sync";

const UNKNOWN_BLOCK: &str = "unknown";

/// Alert text for an outage. The interval is the configured report interval,
/// not the time elapsed since the node fell behind.
pub fn out_of_sync(snapshot: SyncSnapshot, report_interval: Duration) -> String {
    let (current, highest) = block_figures(snapshot);
    let mut text = String::new();
    let _ = writeln!(
        text,
        "🔴 your node is out of sync since {}",
        format_duration(report_interval)
    );
    let _ = writeln!(text, "Current block: {current}");
    let _ = writeln!(text, "Highest block: {highest}");
    text
}

/// Block heights for display. Only a syncing snapshot carries them.
pub fn block_figures(snapshot: SyncSnapshot) -> (String, String) {
    match snapshot {
        SyncSnapshot::Syncing {
            current_block,
            highest_block,
        } => (current_block.to_string(), highest_block.to_string()),
        SyncSnapshot::Synced | SyncSnapshot::Unknown => {
            (UNKNOWN_BLOCK.to_string(), UNKNOWN_BLOCK.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_sync_text_is_exact() {
        let text = out_of_sync(
            SyncSnapshot::Syncing {
                current_block: 100,
                highest_block: 200,
            },
            Duration::from_secs(300),
        );
        assert_eq!(
            text,
            "🔴 your node is out of sync since 5m0s\nCurrent block: 100\nHighest block: 200\n"
        );
    }

    #[test]
    fn unknown_snapshot_renders_placeholder_figures() {
        let text = out_of_sync(SyncSnapshot::Unknown, Duration::from_secs(5));
        assert_eq!(
            text,
            "🔴 your node is out of sync since 5s\nCurrent block: unknown\nHighest block: unknown\n"
        );
    }

    #[test]
    fn only_syncing_snapshot_has_block_figures() {
        let unknown = ("unknown".to_string(), "unknown".to_string());
        assert_eq!(block_figures(SyncSnapshot::Synced), unknown);
        assert_eq!(block_figures(SyncSnapshot::Unknown), unknown);
        assert_eq!(
            block_figures(SyncSnapshot::Syncing {
                current_block: 7,
                highest_block: 9
            }),
            ("7".to_string(), "9".to_string())
        );
    }

    #[test]
    fn back_in_sync_text_is_exact() {
        assert_eq!(BACK_IN_SYNC, "🟢 your node is back in sync");
    }
}
