// BasicCustomHUD - per-player text HUD for game servers

pub mod core;
pub mod host;

pub use crate::core::{OverlayDisplay, StateQuery};
pub use crate::host::{HudConfig, HudPlugin};
