//! Installer and dispatched command failures

use std::process::ExitStatus;

use super::ShellError;

/// Exit code to propagate for a finished process
///
/// A process killed by a signal reports `128 + signal`, as shells do.
pub fn status_code(status: ExitStatus) -> Option<i32> {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        status.code().or_else(|| status.signal().map(|sig| 128 + sig))
    }
    #[cfg(not(unix))]
    {
        status.code()
    }
}

/// Creates an installer failed error from its exit status
pub fn installer_failed(command: impl Into<String>, status: ExitStatus) -> ShellError {
    ShellError::InstallerFailed {
        command: command.into(),
        status: status.to_string(),
        code: status_code(status),
    }
}

/// Creates an installer spawn failed error
pub fn installer_spawn_failed(program: impl Into<String>, reason: impl Into<String>) -> ShellError {
    ShellError::InstallerSpawnFailed {
        program: program.into(),
        reason: reason.into(),
    }
}

/// Creates a command failed error from its exit status
pub fn command_failed(command: impl Into<String>, status: ExitStatus) -> ShellError {
    ShellError::CommandFailed {
        command: command.into(),
        status: status.to_string(),
        code: status_code(status),
    }
}

/// Creates a command spawn failed error
pub fn command_spawn_failed(program: impl Into<String>, reason: impl Into<String>) -> ShellError {
    ShellError::CommandSpawnFailed {
        program: program.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid command line error
pub fn invalid_command_line(command: impl Into<String>) -> ShellError {
    ShellError::InvalidCommandLine {
        command: command.into(),
    }
}
