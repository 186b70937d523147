//! Role display catalog
//!
//! Maps a role to the name and color shown by `{role}` and `{spectated_role}`.
//! Backed by a flat text file, one `RoleId: Display Name, color` entry per line.

use std::collections::HashMap;

use tracing::{debug, error, info};

use super::config_source::{ConfigResource, ConfigSource, ConfigSourceError};
use super::roles::RoleId;

/// Color used when a role has no entry
pub const FALLBACK_COLOR: &str = "white";

/// Display name and color for one role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleDisplayEntry {
    pub name: String,
    /// Hex code (`#FF0000`) or color name (`red`)
    pub color: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoleCatalog {
    entries: HashMap<RoleId, RoleDisplayEntry>,
}

impl RoleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the role-color file format
    ///
    /// Blank lines and `#` comments are skipped, as are lines whose key is not
    /// a known role. A missing color falls back to `white`.
    pub fn parse(contents: &str) -> Self {
        let mut entries = HashMap::new();

        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                continue;
            };
            let Ok(role) = key.parse::<RoleId>() else {
                debug!(key = key.trim(), "[ROLES] Skipping unknown role");
                continue;
            };

            let mut values = value.split(',');
            let name = values.next().unwrap_or_default().trim().to_string();
            let color = values
                .next()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .unwrap_or(FALLBACK_COLOR)
                .to_string();

            entries.insert(role, RoleDisplayEntry { name, color });
        }

        Self { entries }
    }

    /// Contents of a freshly generated role-color file
    ///
    /// One line per role except `None`, colored by team.
    pub fn default_file_contents() -> String {
        let mut lines = vec![
            "# Format: RoleId: Name, Color".to_string(),
            "# Colors can be hex codes (#FF0000) or standard names (red, blue, etc.)".to_string(),
        ];

        lines.extend(
            RoleId::ALL
                .iter()
                .filter(|role| **role != RoleId::None)
                .map(|role| {
                    format!(
                        "{}: {}, {}",
                        role.as_str(),
                        role.default_display_name(),
                        role.default_color()
                    )
                }),
        );

        let mut contents = lines.join("\n");
        contents.push('\n');
        contents
    }

    /// Load the catalog, generating the default file first when it is absent
    pub fn load(source: &dyn ConfigSource) -> Result<Self, ConfigSourceError> {
        let contents = match source.read(ConfigResource::RoleColors)? {
            Some(contents) => contents,
            None => {
                let contents = Self::default_file_contents();
                match source.write(ConfigResource::RoleColors, &contents) {
                    Ok(()) => info!("[ROLES] Created default role config"),
                    Err(e) => error!(error = %e, "[ROLES] Failed to create default role config"),
                }
                contents
            }
        };

        let catalog = Self::parse(&contents);
        debug!(count = catalog.len(), "[ROLES] Loaded role configurations");
        Ok(catalog)
    }

    pub fn get(&self, role: RoleId) -> Option<&RoleDisplayEntry> {
        self.entries.get(&role)
    }

    /// Configured name, or the role identifier when there is no entry
    pub fn name_of(&self, role: RoleId) -> &str {
        self.entries
            .get(&role)
            .map(|e| e.name.as_str())
            .unwrap_or_else(|| role.as_str())
    }

    pub fn color_of(&self, role: RoleId) -> &str {
        self.entries
            .get(&role)
            .map(|e| e.color.as_str())
            .unwrap_or(FALLBACK_COLOR)
    }

    /// Rich-text colored role name, as rendered in a HUD label
    pub fn colored_name(&self, role: RoleId) -> String {
        format!("<color={}>{}</color>", self.color_of(role), self.name_of(role))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
