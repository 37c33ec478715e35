//! Shebang directive and request configuration errors

use super::ShellError;

/// Creates a malformed directive error
pub fn malformed(line: impl Into<String>, reason: impl Into<String>) -> ShellError {
    ShellError::MalformedDirective {
        line: line.into(),
        reason: reason.into(),
    }
}

/// Creates a conflicting interpreter error
pub fn conflicting_interpreter(first: impl Into<String>, second: impl Into<String>) -> ShellError {
    ShellError::ConflictingInterpreter {
        first: first.into(),
        second: second.into(),
    }
}

/// Creates a script read failed error
pub fn script_read_failed(path: impl Into<String>, reason: impl Into<String>) -> ShellError {
    ShellError::ScriptReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
