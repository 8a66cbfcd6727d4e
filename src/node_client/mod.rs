mod api_types;
mod client;
mod helpers;

pub use api_types::SyncProgress;
pub use client::NodeClient;
