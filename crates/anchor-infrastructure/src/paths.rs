//! Path management for Anchor's files.

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find a config directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Locations of every file Anchor reads or writes.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/anchor/            # root (platform config dir + "anchor")
/// ├── secret.json              # API key and model
/// ├── store.toml               # disclaimer flag, session snapshot, history
/// └── logs/
///     └── anchor.log
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorPaths {
    root: PathBuf,
}

impl AnchorPaths {
    /// Paths under the platform config directory.
    pub fn new() -> Result<Self, PathError> {
        let base = dirs::config_dir().ok_or(PathError::ConfigDirNotFound)?;
        Ok(Self::with_root(base.join("anchor")))
    }

    /// Paths under a custom root (CLI override, tests).
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn secret_file(&self) -> PathBuf {
        self.root.join("secret.json")
    }

    pub fn store_file(&self) -> PathBuf {
        self.root.join("store.toml")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.root.join("logs")
    }

    pub fn log_file(&self) -> PathBuf {
        self.logs_dir().join("anchor.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_live_under_root() {
        let paths = AnchorPaths::with_root("/tmp/anchor-test");
        assert_eq!(paths.secret_file(), PathBuf::from("/tmp/anchor-test/secret.json"));
        assert_eq!(paths.store_file(), PathBuf::from("/tmp/anchor-test/store.toml"));
        assert_eq!(paths.log_file(), PathBuf::from("/tmp/anchor-test/logs/anchor.log"));
    }
}
