//! Environment discovery and history log errors

use super::ShellError;

/// Creates an environment not found error
pub fn not_found(name: impl Into<String>) -> ShellError {
    ShellError::EnvironmentNotFound { name: name.into() }
}

/// Creates an error for a named environment whose history does not match
pub fn explicit_mismatch(name: impl Into<String>) -> ShellError {
    ShellError::ExplicitEnvironmentMismatch { name: name.into() }
}

/// Creates an environment listing failed error
pub fn list_failed(reason: impl Into<String>) -> ShellError {
    ShellError::EnvironmentListFailed {
        reason: reason.into(),
    }
}

/// Creates a history read failed error
pub fn history_read_failed(path: impl Into<String>, reason: impl Into<String>) -> ShellError {
    ShellError::HistoryReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
