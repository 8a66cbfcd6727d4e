use std::process::ExitCode;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use node_sync_monitor::config::Config;
use node_sync_monitor::monitor::{MonitorSettings, SyncMonitor};
use node_sync_monitor::node_client::NodeClient;
use node_sync_monitor::telegram::TelegramBot;
use node_sync_monitor::types::MonitorError;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Sync monitor failed to start");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), MonitorError> {
    let config = Config::from_env()?;

    let node = NodeClient::connect(&config.node_url).map_err(|err| {
        MonitorError::Config(format!("Error creating node client: {err}"))
    })?;
    let bot = TelegramBot::connect(&config.bot_token, config.telegram_api_url.as_deref())
        .await
        .map_err(|err| MonitorError::Config(format!("Error creating Telegram bot: {err}")))?;

    let monitor = SyncMonitor::new(node, bot, MonitorSettings::from(&config)).run();
    tokio::pin!(monitor);
    tokio::select! {
        result = &mut monitor => result?,
        result = tokio::signal::ctrl_c() => match result {
            Ok(()) => info!("Interrupt received, shutting down"),
            Err(err) => {
                warn!(error = %err, "Failed to listen for interrupt");
                monitor.await?;
            }
        },
    }

    Ok(())
}
