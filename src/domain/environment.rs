//! Environment candidate types

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Directory (relative to an environment) holding installer metadata
pub const META_DIR: &str = "conda-meta";

/// History log file name inside [`META_DIR`]
pub const HISTORY_FILE: &str = "history";

/// An environment found on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentRecord {
    /// Basename of the environment directory
    pub name: String,

    /// Environment directory
    pub path: PathBuf,

    /// Last modification time of the directory
    pub modified: SystemTime,
}

impl EnvironmentRecord {
    pub fn new(path: impl Into<PathBuf>, modified: SystemTime) -> Self {
        let path = path.into();
        Self {
            name: basename(&path),
            path,
            modified,
        }
    }

    /// Path to the installer's history log for this environment
    pub fn history_path(&self) -> PathBuf {
        self.path.join(META_DIR).join(HISTORY_FILE)
    }

    /// Directory holding the environment's executables
    pub fn bin_dir(&self) -> PathBuf {
        if cfg!(windows) {
            self.path.join("Scripts")
        } else {
            self.path.join("bin")
        }
    }
}

/// Basename of an environment path, lossily converted
pub fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Generate a fresh environment name: `prefix` followed by a UUID v4 in hex
pub fn generate_env_name(prefix: &str) -> String {
    format!("{prefix}{}", uuid::Uuid::new_v4().simple())
}
