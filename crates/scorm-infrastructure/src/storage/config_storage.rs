//! `scorm.toml` storage.
//!
//! Reads and writes the typed [`ConfigRoot`]. Writes are atomic: the TOML is
//! written to a temporary file in the same directory, synced, then renamed
//! over the target.

use scorm_core::{ConfigRoot, EngineConfig, Result, ScormError};
use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};

pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates a new config storage handle.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to `scorm.toml`
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Opens the config file at the resolved default location.
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(crate::paths::ScormPaths::config_file()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the config file.
    ///
    /// A missing or empty file yields the defaults.
    ///
    /// # Returns
    ///
    /// - `Ok(ConfigRoot)`: Parsed config, missing fields defaulted
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<ConfigRoot> {
        if !self.path.exists() {
            tracing::debug!(
                "[Config] {} not found, using defaults",
                self.path.display()
            );
            return Ok(ConfigRoot::default());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(ConfigRoot::default());
        }

        let root: ConfigRoot = toml::from_str(&content)?;
        tracing::info!("[Config] Loaded {}", self.path.display());
        Ok(root)
    }

    /// Loads only the `[engine]` section.
    pub fn load_engine(&self) -> Result<EngineConfig> {
        self.load().map(|root| root.engine)
    }

    /// Saves the config atomically.
    ///
    /// A `[package]` section is validated before anything is written.
    pub fn save(&self, root: &ConfigRoot) -> Result<()> {
        if let Some(package) = &root.package {
            package.validate()?;
        }

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_string = toml::to_string_pretty(root)?;

        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(toml_string.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;
        tracing::info!("[Config] Saved {}", self.path.display());
        Ok(())
    }

    fn temp_path(&self) -> Result<PathBuf> {
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| ScormError::io(format!("{} has no file name", self.path.display())))?;
        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(self.path.with_file_name(tmp_name))
    }
}
