mod duration;
mod loader;
mod types;

pub use duration::{format_duration, parse_duration, DurationError};
pub use types::Config;
