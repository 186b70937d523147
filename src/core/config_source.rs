//! Configuration source - flat text resources edited by server admins
//!
//! The catalogs read their backing text through this trait so they can be
//! exercised without touching the filesystem.

use std::fmt;

/// Text resources the HUD reads at round start
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigResource {
    /// Rotating messages, one per line
    Rules,
    /// Role display table, `RoleId: Name, Color` per line
    RoleColors,
}

impl ConfigResource {
    pub fn file_name(self) -> &'static str {
        match self {
            ConfigResource::Rules => "rules.txt",
            ConfigResource::RoleColors => "rolecolors.yml",
        }
    }
}

impl fmt::Display for ConfigResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigSourceError {
    #[error("failed to read {resource}: {source}")]
    Read {
        resource: ConfigResource,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {resource}: {source}")]
    Write {
        resource: ConfigResource,
        #[source]
        source: std::io::Error,
    },
}

/// Read/write access to the admin-editable text resources
pub trait ConfigSource: Send + Sync {
    /// Read a resource. `Ok(None)` means it does not exist yet.
    fn read(&self, resource: ConfigResource) -> Result<Option<String>, ConfigSourceError>;

    /// Create or replace a resource
    fn write(&self, resource: ConfigResource, contents: &str) -> Result<(), ConfigSourceError>;
}

// =============================================================================
// TEST MOCKS
// =============================================================================

#[cfg(test)]
pub mod mocks {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// In-memory config source
    #[derive(Default)]
    pub struct MemoryConfigSource {
        pub files: Mutex<HashMap<ConfigResource, String>>,
        pub writes: Mutex<Vec<ConfigResource>>,
        pub fail_reads: bool,
        pub fail_writes: bool,
    }

    impl MemoryConfigSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(resource: ConfigResource, contents: &str) -> Self {
            let source = Self::new();
            source.files.lock().insert(resource, contents.to_string());
            source
        }

        pub fn contents(&self, resource: ConfigResource) -> Option<String> {
            self.files.lock().get(&resource).cloned()
        }

        pub fn write_count(&self, resource: ConfigResource) -> usize {
            self.writes.lock().iter().filter(|r| **r == resource).count()
        }
    }

    impl ConfigSource for MemoryConfigSource {
        fn read(&self, resource: ConfigResource) -> Result<Option<String>, ConfigSourceError> {
            if self.fail_reads {
                return Err(ConfigSourceError::Read {
                    resource,
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                });
            }
            Ok(self.files.lock().get(&resource).cloned())
        }

        fn write(&self, resource: ConfigResource, contents: &str) -> Result<(), ConfigSourceError> {
            if self.fail_writes {
                return Err(ConfigSourceError::Write {
                    resource,
                    source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
                });
            }
            self.writes.lock().push(resource);
            self.files.lock().insert(resource, contents.to_string());
            Ok(())
        }
    }
}
