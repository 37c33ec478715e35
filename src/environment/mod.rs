//! Environment selection and lifecycle
//!
//! - [`discovery`]: list candidate environments, most recently modified first
//! - [`activation`]: patch (and restore) the variables a child process sees
//!
//! [`select`] ties discovery, the history reader and the matcher together:
//! the first candidate whose history matches the request is reused, otherwise
//! a fresh environment is built step by step. An environment named with
//! `-n` that exists but does not match is an error, never rebuilt in place.

pub mod activation;
pub mod discovery;

use crate::config::Config;
use crate::domain::{EnvironmentRecord, InstallRequest};
use crate::error::{Result, environment};
use crate::history;
use crate::installer::Installer;
use crate::matcher;

pub use activation::{ActivatedEnv, EnvVars};

/// Outcome of environment selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// An existing environment matched the request
    Reused(EnvironmentRecord),

    /// A fresh environment was built for the request
    Created(EnvironmentRecord),
}

impl Selection {
    pub fn record(&self) -> &EnvironmentRecord {
        match self {
            Selection::Reused(record) | Selection::Created(record) => record,
        }
    }

    pub fn into_record(self) -> EnvironmentRecord {
        match self {
            Selection::Reused(record) | Selection::Created(record) => record,
        }
    }

    pub fn is_reused(&self) -> bool {
        matches!(self, Selection::Reused(_))
    }
}

/// Reuse a matching environment or create a new one
///
/// `before_create` runs once, just before the installer is asked to build a
/// fresh environment.
pub fn select<F>(
    installer: &dyn Installer,
    config: &Config,
    request: &InstallRequest,
    before_create: F,
) -> Result<Selection>
where
    F: FnOnce(&InstallRequest),
{
    let candidates = discovery::candidates(installer, config, request)?;
    if let Some(record) = find_reusable(&candidates, request) {
        return Ok(Selection::Reused(record));
    }
    if request.has_explicit_name() && !candidates.is_empty() {
        return Err(environment::explicit_mismatch(request.env_name()));
    }
    before_create(request);
    create(installer, request).map(Selection::Created)
}

/// First candidate whose history matches `request`
///
/// Candidates are tried in the given order and the search stops at the first
/// match. A candidate whose history cannot be read is skipped.
pub fn find_reusable(
    candidates: &[EnvironmentRecord],
    request: &InstallRequest,
) -> Option<EnvironmentRecord> {
    for candidate in candidates {
        let entries = match history::read_history(&candidate.history_path()) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(env = %candidate.name, error = %e, "skipping unreadable history");
                continue;
            }
        };
        match matcher::check(&entries, request) {
            Ok(()) => {
                tracing::debug!(env = %candidate.name, "history matches request");
                return Some(candidate.clone());
            }
            Err(mismatch) => {
                tracing::debug!(env = %candidate.name, ?mismatch, "history does not match");
            }
        }
    }
    None
}

/// Build a fresh environment: the create step, then each install step in order
///
/// A failing step stops the build and leaves the environment as the installer
/// left it.
pub fn create(installer: &dyn Installer, request: &InstallRequest) -> Result<EnvironmentRecord> {
    installer.create(request.create_step())?;
    for step in request.install_steps() {
        installer.install(step)?;
    }
    locate(installer, request.env_name())
}

/// Find an environment by exact basename among everything the installer lists
pub fn locate(installer: &dyn Installer, name: &str) -> Result<EnvironmentRecord> {
    discovery::named(installer, name)?.ok_or_else(|| environment::not_found(name))
}
