// Configuration module for BasicCustomHUD

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::core::display::SyncSpeed;
use crate::core::label::LabelSpec;

// =============================================================================
// CONFIGURATION STRUCTURES
// =============================================================================

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LoggingSettings {
    /// Mirror log output to stdout
    #[serde(default)]
    pub console: bool,
    /// Log file path (relative to the config directory or absolute). Empty = no file logging.
    #[serde(default)]
    pub log_file: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HudConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Enables debug-level logs for this plugin
    #[serde(default)]
    pub debug: bool,

    /// Seconds each rotating rule stays on screen
    #[serde(default = "default_rule_pass_time")]
    pub rule_pass_time: f32,

    /// Main info line shown to every player
    #[serde(default = "default_standard_label")]
    pub standard: LabelSpec,

    /// Rotating rules, spectators only
    #[serde(default = "default_rules_label")]
    pub rules: LabelSpec,

    /// Static announcement, spectators only
    #[serde(default = "default_announcement_label")]
    pub announcement: LabelSpec,

    #[serde(default)]
    pub logging: LoggingSettings,
}

fn default_enabled() -> bool {
    true
}
fn default_rule_pass_time() -> f32 {
    5.0
}

fn default_standard_label() -> LabelSpec {
    LabelSpec {
        format: "<color=red>NAME:</color>{playername} | <color=green>TIME:</color>{time} | \
                 <color=#42e9f5>TPS:</color>{tps} | <color=blue>ROLE:</color> {role} | \
                 <color=#777777>ID:</color>{id}\nNext Spawn: {nextspawn}"
            .to_string(),
        ..LabelSpec::default()
    }
}

fn default_rules_label() -> LabelSpec {
    LabelSpec {
        only_spectator: true,
        y_coordinate: 730.0,
        font_size: 16,
        sync_speed: SyncSpeed::Slow,
        format: "<color=#ffcc00>{rules}</color>".to_string(),
        ..LabelSpec::default()
    }
}

fn default_announcement_label() -> LabelSpec {
    LabelSpec {
        only_spectator: true,
        y_coordinate: 650.0,
        sync_speed: SyncSpeed::Slow,
        format: "Join Our Discord Server!".to_string(),
        ..LabelSpec::default()
    }
}

impl Default for HudConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            debug: false,
            rule_pass_time: default_rule_pass_time(),
            standard: default_standard_label(),
            rules: default_rules_label(),
            announcement: default_announcement_label(),
            logging: LoggingSettings::default(),
        }
    }
}

// =============================================================================
// CONFIG LOADING
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl HudConfig {
    pub const CONFIG_FILENAME: &'static str = "basic_custom_hud.toml";

    /// Load configuration from `path`, falling back to defaults when it does not exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "[config] Looking for config");

        if !path.exists() {
            debug!("[config] No config found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: HudConfig = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "[config] Loaded config");
        Ok(config)
    }

    /// Load `basic_custom_hud.toml` from a directory
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        Self::load(&dir.join(Self::CONFIG_FILENAME))
    }

    /// All labels in priority order: standard, rules, announcement
    pub fn labels(&self) -> Vec<LabelSpec> {
        vec![
            self.standard.clone(),
            self.rules.clone(),
            self.announcement.clone(),
        ]
    }

    pub fn any_label_enabled(&self) -> bool {
        self.standard.enabled || self.rules.enabled || self.announcement.enabled
    }

    /// Rule rotation interval; invalid values fall back to the default
    pub fn rule_interval(&self) -> Duration {
        Duration::try_from_secs_f32(self.rule_pass_time).unwrap_or_else(|e| {
            warn!(
                rule_pass_time = self.rule_pass_time,
                error = %e,
                "[config] Invalid rule_pass_time, using default"
            );
            Duration::from_secs_f32(default_rule_pass_time())
        })
    }
}
