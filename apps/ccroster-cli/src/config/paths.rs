//! Platform-specific configuration paths

use crate::error::{CliError, CliResult};
use std::path::{Path, PathBuf};

/// Configuration paths for the ccroster CLI
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    /// Base configuration directory
    pub config_dir: PathBuf,
    /// Path to config.json
    pub config_file: PathBuf,
    /// Path to session.json
    pub session_file: PathBuf,
    /// Path to selection.json
    pub selection_file: PathBuf,
}

impl ConfigPaths {
    /// Get configuration paths for the current platform
    ///
    /// Paths:
    /// - Linux: ~/.config/ccroster/
    /// - macOS: ~/Library/Application Support/ccroster/
    /// - Windows: %APPDATA%\ccroster\
    pub fn new() -> CliResult<Self> {
        Ok(Self::in_dir(Self::get_config_dir()?))
    }

    /// Paths rooted at an explicit directory.
    pub fn in_dir(config_dir: impl AsRef<Path>) -> Self {
        let config_dir = config_dir.as_ref().to_path_buf();
        Self {
            config_file: config_dir.join("config.json"),
            session_file: config_dir.join("session.json"),
            selection_file: config_dir.join("selection.json"),
            config_dir,
        }
    }

    /// Get the configuration directory, respecting CCROSTER_CONFIG_DIR env var
    fn get_config_dir() -> CliResult<PathBuf> {
        if let Ok(dir) = std::env::var("CCROSTER_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let base_dir = dirs::config_dir().ok_or_else(|| {
            CliError::Config("Could not determine configuration directory".to_string())
        })?;

        Ok(base_dir.join("ccroster"))
    }

    /// Ensure the configuration directory exists
    pub fn ensure_dir_exists(&self) -> CliResult<()> {
        if !self.config_dir.exists() {
            std::fs::create_dir_all(&self.config_dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paths_new() {
        // This test may fail on systems without a config directory
        if dirs::config_dir().is_some() {
            let paths = ConfigPaths::new().unwrap();
            assert!(paths.config_file.ends_with("config.json"));
            assert!(paths.session_file.ends_with("session.json"));
            assert!(paths.selection_file.ends_with("selection.json"));
        }
    }

    #[test]
    fn test_in_dir() {
        let paths = ConfigPaths::in_dir("/tmp/ccroster-test");
        assert_eq!(paths.config_dir, PathBuf::from("/tmp/ccroster-test"));
        assert_eq!(
            paths.selection_file,
            PathBuf::from("/tmp/ccroster-test/selection.json")
        );
    }

    #[test]
    fn test_ensure_dir_exists_creates_nested() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let paths = ConfigPaths::in_dir(temp_dir.path().join("a/b"));
        paths.ensure_dir_exists().unwrap();
        assert!(paths.config_dir.is_dir());
    }
}
