//! Process-wide settings read once at startup
//!
//! Settings come from environment variables. [`Config::from_lookup`] takes the
//! lookup as a closure so tests never have to touch the real process
//! environment.

use std::path::PathBuf;

/// Prefix marking environments owned by conda-shell
pub const DEFAULT_ENV_PREFIX: &str = "shell_";

/// Overrides [`DEFAULT_ENV_PREFIX`]
pub const ENV_PREFIX_VAR: &str = "CONDA_SHELL_ENV_PREFIX";

/// Explicit path to the conda executable
pub const CONDA_EXE_OVERRIDE_VAR: &str = "CONDA_SHELL_CONDA_EXE";

/// Set by `conda activate`; used when no override is given
pub const CONDA_EXE_VAR: &str = "CONDA_EXE";

/// Log filter directives (`tracing_subscriber::EnvFilter` syntax)
pub const LOG_VAR: &str = "CONDA_SHELL_LOG";

/// Executable used when neither variable is set
const DEFAULT_CONDA_EXE: &str = "conda";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Environments whose basename starts with this prefix are reuse candidates
    pub env_prefix: String,

    /// conda executable used for listing, creating and installing
    pub conda_exe: PathBuf,

    /// Log filter directives, when given
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            conda_exe: PathBuf::from(DEFAULT_CONDA_EXE),
            log_filter: None,
        }
    }
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let env_prefix = get(ENV_PREFIX_VAR).unwrap_or_else(|| DEFAULT_ENV_PREFIX.to_string());
        let conda_exe = get(CONDA_EXE_OVERRIDE_VAR)
            .or_else(|| get(CONDA_EXE_VAR))
            .map_or_else(|| PathBuf::from(DEFAULT_CONDA_EXE), PathBuf::from);

        Self {
            env_prefix,
            conda_exe,
            log_filter: get(LOG_VAR),
        }
    }

    /// Whether an environment basename belongs to conda-shell
    pub fn is_shell_env(&self, name: &str) -> bool {
        name.starts_with(&self.env_prefix)
    }
}
