//! Error types and handling for conda-shell
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`directive`]: Shebang directive and request configuration errors
//! - [`environment`]: Environment discovery and history log errors
//! - [`process`]: Installer and dispatched command failures

pub mod directive;
pub mod environment;
pub mod process;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for conda-shell operations
#[derive(Error, Diagnostic, Debug)]
pub enum ShellError {
    // Configuration errors
    #[error("Explicit environment name is not allowed in a shebang directive: {line}")]
    #[diagnostic(
        code(conda_shell::directive::name_forbidden),
        help("Remove -n/--name; conda-shell names shebang environments itself")
    )]
    NameInDirective { line: String },

    #[error("Explicit run command is not allowed in a shebang directive: {line}")]
    #[diagnostic(
        code(conda_shell::directive::run_forbidden),
        help("Remove --run; the script is run with the -i/--interpreter program")
    )]
    RunInDirective { line: String },

    #[error("The first conda-shell directive in {script} must select an interpreter")]
    #[diagnostic(
        code(conda_shell::directive::missing_interpreter),
        help("Add -i/--interpreter, e.g. `#!conda-shell -i python python=3.6`")
    )]
    MissingInterpreter { script: String },

    #[error("Conflicting interpreter arguments: '{first}' and '{second}'")]
    #[diagnostic(
        code(conda_shell::directive::conflicting_interpreter),
        help("Make every -i/--interpreter argument identical, or keep only the first one")
    )]
    ConflictingInterpreter { first: String, second: String },

    #[error("Malformed conda-shell directive '{line}': {reason}")]
    #[diagnostic(code(conda_shell::directive::malformed))]
    MalformedDirective { line: String, reason: String },

    #[error("No conda-shell directives found in {script}")]
    #[diagnostic(
        code(conda_shell::directive::none_found),
        help("Add a `#!conda-shell -i <interpreter> <packages>` line right after the first line")
    )]
    NoDirectives { script: String },

    #[error("An install request needs at least one step")]
    #[diagnostic(code(conda_shell::request::empty))]
    EmptyRequest,

    #[error("Failed to read script: {path}")]
    #[diagnostic(code(conda_shell::directive::script_read_failed))]
    ScriptReadFailed { path: String, reason: String },

    // Discovery errors
    #[error("Could not find freshly-created environment named '{name}'")]
    #[diagnostic(
        code(conda_shell::environment::not_found),
        help("conda reported success but the environment is not listed by `conda info --envs`")
    )]
    EnvironmentNotFound { name: String },

    #[error("Environment '{name}' exists but was built from a different request")]
    #[diagnostic(
        code(conda_shell::environment::explicit_mismatch),
        help("Pick another -n/--name, or drop it to let conda-shell pick an environment")
    )]
    ExplicitEnvironmentMismatch { name: String },

    #[error("Failed to list conda environments: {reason}")]
    #[diagnostic(code(conda_shell::environment::list_failed))]
    EnvironmentListFailed { reason: String },

    #[error("Failed to read history log: {path}")]
    #[diagnostic(code(conda_shell::environment::history_read_failed))]
    HistoryReadFailed { path: String, reason: String },

    // External tool failures
    #[error("Installer command failed ({status}): {command}")]
    #[diagnostic(code(conda_shell::installer::failed))]
    InstallerFailed {
        command: String,
        status: String,
        code: Option<i32>,
    },

    #[error("Failed to launch installer '{program}': {reason}")]
    #[diagnostic(
        code(conda_shell::installer::spawn_failed),
        help("Set CONDA_SHELL_CONDA_EXE or CONDA_EXE to the conda executable")
    )]
    InstallerSpawnFailed { program: String, reason: String },

    #[error("Command failed ({status}): {command}")]
    #[diagnostic(code(conda_shell::exec::failed))]
    CommandFailed {
        command: String,
        status: String,
        code: Option<i32>,
    },

    #[error("Failed to run '{program}': {reason}")]
    #[diagnostic(code(conda_shell::exec::spawn_failed))]
    CommandSpawnFailed { program: String, reason: String },

    #[error("Invalid command line: {command}")]
    #[diagnostic(
        code(conda_shell::exec::invalid_command_line),
        help("Check for unbalanced quotes")
    )]
    InvalidCommandLine { command: String },

    #[error("Interactive shell failed: {message}")]
    #[diagnostic(code(conda_shell::repl::failed))]
    ReplFailed { message: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(conda_shell::fs::io_error))]
    IoError { message: String },
}

impl ShellError {
    /// Process exit status to report for this error
    ///
    /// Failed external commands mirror their own status; everything else is 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            ShellError::InstallerFailed {
                code: Some(code), ..
            }
            | ShellError::CommandFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }

    /// Whether this error was raised while validating the request
    ///
    /// These are reported before any environment is touched.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            ShellError::NameInDirective { .. }
                | ShellError::RunInDirective { .. }
                | ShellError::MissingInterpreter { .. }
                | ShellError::ConflictingInterpreter { .. }
                | ShellError::MalformedDirective { .. }
                | ShellError::NoDirectives { .. }
                | ShellError::EmptyRequest
                | ShellError::ScriptReadFailed { .. }
                | ShellError::ExplicitEnvironmentMismatch { .. }
        )
    }
}

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        ShellError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ShellError {
    fn from(err: serde_json::Error) -> Self {
        ShellError::EnvironmentListFailed {
            reason: err.to_string(),
        }
    }
}

impl From<rustyline::error::ReadlineError> for ShellError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        ShellError::ReplFailed {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, ShellError>;
