//! Path resolution for scorm-sync configuration files.

use scorm_core::{Result, ScormError};
use std::ffi::OsString;
use std::path::PathBuf;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "SCORM_SYNC_CONFIG";

const APP_DIR: &str = "scorm-sync";
const CONFIG_FILE: &str = "scorm.toml";

/// Path management for scorm-sync.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/scorm-sync/        # Config directory (platform default)
/// └── scorm.toml               # [engine] and [package] sections
/// ```
pub struct ScormPaths;

impl ScormPaths {
    /// Returns the scorm-sync configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/scorm-sync/`)
    /// - `Err(ScormError::Config)`: The platform has no config directory
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ScormError::config("cannot determine the platform config directory"))
    }

    /// Returns the path to `scorm.toml`, honouring `SCORM_SYNC_CONFIG`.
    pub fn config_file() -> Result<PathBuf> {
        Self::resolve_config_file(std::env::var_os(CONFIG_ENV))
    }

    fn resolve_config_file(override_path: Option<OsString>) -> Result<PathBuf> {
        match override_path.filter(|p| !p.is_empty()) {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(Self::config_dir()?.join(CONFIG_FILE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_wins() {
        let path = ScormPaths::resolve_config_file(Some("/tmp/custom.toml".into())).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/custom.toml"));
    }

    #[test]
    fn empty_override_is_ignored() {
        if let Ok(dir) = ScormPaths::config_dir() {
            let path = ScormPaths::resolve_config_file(Some(OsString::new())).unwrap();
            assert_eq!(path, dir.join("scorm.toml"));
            assert!(path.ends_with("scorm-sync/scorm.toml"));
        }
    }
}
