//! Core module - HUD logic independent of the host server

pub mod config_source;
pub mod display;
pub mod format;
pub mod hud_template;
pub mod label;
pub mod placeholder;
pub mod registry;
pub mod role_catalog;
pub mod roles;
pub mod rotation;
pub mod traits;

pub use config_source::{ConfigResource, ConfigSource, ConfigSourceError};
pub use display::{
    Alignment, DisplayError, OverlayDisplay, OverlayHandle, OverlayLayout, SyncSpeed, TextSource,
};
pub use hud_template::{resolve, ResolveContext};
pub use label::{HudAssets, HudContext, LabelRenderer, LabelSpec};
pub use registry::{OverlayRegistry, RegistryError};
pub use role_catalog::RoleCatalog;
pub use roles::RoleId;
pub use rotation::RotatingMessageList;
pub use traits::{SessionId, SessionInfo, StateError, StateQuery};
