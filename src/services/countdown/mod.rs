mod config;
mod driver;
mod engine;
mod format;
mod listeners;

pub use config::{load_config, CountdownConfig};
pub use driver::TickDriver;
pub use engine::{CountdownEngine, TICK_INTERVAL};
pub use format::format_remaining;
pub use listeners::ListenerId;
