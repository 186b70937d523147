//! Filesystem-backed configuration source
//!
//! Resources live as plain files in one directory per server instance,
//! `<configs root>/<port>/BasicCustomHUD/`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::config_source::{ConfigResource, ConfigSource, ConfigSourceError};

/// Directory name under the per-port config directory
pub const PLUGIN_DIR_NAME: &str = "BasicCustomHUD";

#[derive(Debug, Clone)]
pub struct FileConfigSource {
    dir: PathBuf,
}

impl FileConfigSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Config directory of the server instance listening on `port`
    pub fn for_server(configs_root: &Path, port: u16) -> Self {
        Self::new(configs_root.join(port.to_string()).join(PLUGIN_DIR_NAME))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, resource: ConfigResource) -> PathBuf {
        self.dir.join(resource.file_name())
    }
}

impl ConfigSource for FileConfigSource {
    fn read(&self, resource: ConfigResource) -> Result<Option<String>, ConfigSourceError> {
        let path = self.path_of(resource);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "[config] Resource not found");
                Ok(None)
            }
            Err(source) => Err(ConfigSourceError::Read { resource, source }),
        }
    }

    fn write(&self, resource: ConfigResource, contents: &str) -> Result<(), ConfigSourceError> {
        let path = self.path_of(resource);
        fs::create_dir_all(&self.dir)
            .and_then(|()| fs::write(&path, contents))
            .map_err(|source| ConfigSourceError::Write { resource, source })?;
        debug!(path = %path.display(), "[config] Wrote resource");
        Ok(())
    }
}
