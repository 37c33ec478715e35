//! Candidate environment discovery

use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::domain::environment::basename;
use crate::domain::{EnvironmentRecord, InstallRequest};
use crate::error::Result;
use crate::installer::Installer;

/// Environments that may be reused for `request`, most recently modified first
///
/// Normally these are the environments carrying the configured prefix. A
/// request with an explicit name only considers the environment of that name.
pub fn candidates(
    installer: &dyn Installer,
    config: &Config,
    request: &InstallRequest,
) -> Result<Vec<EnvironmentRecord>> {
    if request.has_explicit_name() {
        return Ok(named(installer, request.env_name())?.into_iter().collect());
    }
    shell_environments(installer, config)
}

/// Every environment carrying the configured prefix, most recently modified first
pub fn shell_environments(
    installer: &dyn Installer,
    config: &Config,
) -> Result<Vec<EnvironmentRecord>> {
    let mut records: Vec<EnvironmentRecord> = installer
        .environments()?
        .iter()
        .filter(|path| config.is_shell_env(&basename(path)))
        .filter_map(|path| stat(path))
        .collect();
    sort_most_recent_first(&mut records);
    Ok(records)
}

/// The environment whose basename is exactly `name`, if the installer lists one
pub fn named(installer: &dyn Installer, name: &str) -> Result<Option<EnvironmentRecord>> {
    Ok(installer
        .environments()?
        .iter()
        .filter(|path| basename(path) == name)
        .find_map(|path| stat(path)))
}

/// Sort by modification time, newest first
///
/// The sort is stable: environments with equal times keep the order the
/// installer listed them in.
pub fn sort_most_recent_first(records: &mut [EnvironmentRecord]) {
    records.sort_by(|a, b| b.modified.cmp(&a.modified));
}

fn stat(path: &Path) -> Option<EnvironmentRecord> {
    match fs::metadata(path).and_then(|metadata| metadata.modified()) {
        Ok(modified) => Some(EnvironmentRecord::new(path, modified)),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "skipping unreadable environment");
            None
        }
    }
}
