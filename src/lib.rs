pub mod config;
pub mod monitor;
pub mod node_client;
pub mod telegram;
pub mod traits;
pub mod types;
