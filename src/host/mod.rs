//! Host module - process-level wiring around the core HUD

pub mod config;
pub mod events;
pub mod files;
pub mod logging;

pub use config::{ConfigError, HudConfig, LoggingSettings};
pub use events::{HudEventHandlers, HudPlugin};
pub use files::FileConfigSource;
pub use logging::init_logging;
