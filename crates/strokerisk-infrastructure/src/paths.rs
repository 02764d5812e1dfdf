//! Path management for StrokeRisk configuration files.
//!
//! ```text
//! ~/.config/strokerisk/        # Config directory (platform dependent)
//! └── config.toml              # Application configuration
//! ```

use std::path::PathBuf;

use strokerisk_core::{Result, StrokeRiskError};

const APP_DIR: &str = "strokerisk";
const CONFIG_FILE: &str = "config.toml";

pub struct StrokeRiskPaths;

impl StrokeRiskPaths {
    /// Returns the StrokeRisk configuration directory.
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| StrokeRiskError::config("Cannot find config directory"))
    }

    /// Returns the path of `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file_lives_under_app_dir() {
        if let Ok(path) = StrokeRiskPaths::config_file() {
            assert!(path.ends_with("strokerisk/config.toml"));
        }
    }
}
