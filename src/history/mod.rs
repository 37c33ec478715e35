//! History log reader
//!
//! conda appends to `<env>/conda-meta/history` every time it changes an
//! environment. The lines of interest look like
//!
//! ```text
//! # cmd: /opt/conda/bin/conda create -n shell_0123 -y python=3.6 numpy=1.12
//! ```
//!
//! This module turns those lines into [`HistoryEntry`] values, in log order.
//! It knows nothing about matching; see [`crate::matcher`].

pub mod grammar;

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::domain::{CommandKind, HistoryEntry};
use crate::error::{Result, environment};

/// Marker that starts a recorded command line
pub const CMD_MARKER: &str = "# cmd: ";

/// Parse one log line; `None` if it is not a recorded command
pub fn parse_line(line: &str) -> Option<HistoryEntry> {
    let command = line.strip_prefix(CMD_MARKER)?;
    let mut tokens = command.split_whitespace();

    // The first token is the installer program itself.
    let _program = tokens.next();
    let Some(subcommand) = tokens.next() else {
        return Some(HistoryEntry::other(""));
    };

    match CommandKind::from_subcommand(subcommand) {
        CommandKind::Other(name) => Some(HistoryEntry::other(name)),
        kind => {
            let args = grammar::parse_tokens(tokens);
            tracing::trace!(?kind, name = ?args.name, prefix = ?args.prefix, "recorded command");
            // The log line does not list what these flags installed.
            if let Some(flag) = args.package_source {
                return Some(HistoryEntry::other(format!("{subcommand} {flag}")));
            }
            Some(HistoryEntry::new(kind, args.packages, args.channels))
        }
    }
}

/// Parse a whole log, keeping the order of its recorded commands
pub fn parse_history(text: &str) -> Vec<HistoryEntry> {
    text.lines().filter_map(parse_line).collect()
}

/// Read and parse a history log
///
/// A missing log yields an empty history; such an environment never matches.
pub fn read_history(path: &Path) -> Result<Vec<HistoryEntry>> {
    match fs::read(path) {
        Ok(bytes) => Ok(parse_history(&String::from_utf8_lossy(&bytes))),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no history log");
            Ok(Vec::new())
        }
        Err(e) => Err(environment::history_read_failed(
            path.display().to_string(),
            e.to_string(),
        )),
    }
}
