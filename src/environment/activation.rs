//! Environment activation
//!
//! Child processes do not inherit our environment directly; they get an
//! [`EnvVars`] map. [`ActivatedEnv`] patches that map for one environment and
//! puts the original values back when it is dropped, whichever way the
//! dispatch ends.
//!
//! ## Usage
//!
//! ```ignore
//! let mut vars = EnvVars::from_process();
//! {
//!     let active = ActivatedEnv::activate(&mut vars, &record.bin_dir())?;
//!     exec::run_command("python -V", &[], &active)?;
//! } // PATH and PYTHONSTARTUP restored here, also on error
//! ```

use std::collections::BTreeMap;
use std::env;
use std::ffi::{OsStr, OsString};
use std::ops::Deref;
use std::path::Path;

use crate::error::{Result, ShellError};

/// Executable search path
pub const PATH_VAR: &str = "PATH";

/// Interpreter startup file; host customizations must not leak into the guest
pub const STARTUP_VAR: &str = "PYTHONSTARTUP";

/// Environment-variable table handed to child processes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVars {
    vars: BTreeMap<OsString, OsString>,
}

impl EnvVars {
    /// Snapshot of the current process environment
    pub fn from_process() -> Self {
        env::vars_os().collect()
    }

    pub fn get(&self, key: impl AsRef<OsStr>) -> Option<&OsStr> {
        self.vars.get(key.as_ref()).map(OsString::as_os_str)
    }

    pub fn set(&mut self, key: impl Into<OsString>, value: impl Into<OsString>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: impl AsRef<OsStr>) -> Option<OsString> {
        self.vars.remove(key.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OsString, &OsString)> {
        self.vars.iter()
    }

    fn restore(&mut self, key: &str, value: Option<OsString>) {
        match value {
            Some(value) => self.set(key, value),
            None => {
                self.remove(key);
            }
        }
    }
}

impl<K: Into<OsString>, V: Into<OsString>> FromIterator<(K, V)> for EnvVars {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Scoped activation of an environment over an [`EnvVars`] table
///
/// While alive, `PATH` starts with the environment's executable directory and
/// `PYTHONSTARTUP` is unset. Dropping it restores both to their previous
/// values (including "unset").
#[derive(Debug)]
pub struct ActivatedEnv<'a> {
    vars: &'a mut EnvVars,
    saved_path: Option<OsString>,
    saved_startup: Option<OsString>,
}

impl<'a> ActivatedEnv<'a> {
    pub fn activate(vars: &'a mut EnvVars, bin_dir: &Path) -> Result<Self> {
        let saved_path = vars.get(PATH_VAR).map(OsStr::to_os_string);
        let saved_startup = vars.get(STARTUP_VAR).map(OsStr::to_os_string);

        // Captured before patching, so an error below still restores on drop.
        let mut guard = Self {
            vars,
            saved_path,
            saved_startup,
        };

        let old_entries = guard
            .saved_path
            .as_deref()
            .map(|path| env::split_paths(path).collect::<Vec<_>>())
            .unwrap_or_default();
        let new_path = env::join_paths(std::iter::once(bin_dir.to_path_buf()).chain(old_entries))
            .map_err(|e| ShellError::IoError {
                message: format!("cannot add {} to {PATH_VAR}: {e}", bin_dir.display()),
            })?;

        guard.vars.set(PATH_VAR, new_path);
        guard.vars.remove(STARTUP_VAR);
        tracing::debug!(bin_dir = %bin_dir.display(), "activated environment");
        Ok(guard)
    }
}

impl Deref for ActivatedEnv<'_> {
    type Target = EnvVars;

    fn deref(&self) -> &EnvVars {
        self.vars
    }
}

impl Drop for ActivatedEnv<'_> {
    fn drop(&mut self) {
        self.vars.restore(PATH_VAR, self.saved_path.take());
        self.vars.restore(STARTUP_VAR, self.saved_startup.take());
        tracing::debug!("restored environment variables");
    }
}
