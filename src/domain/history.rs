//! History log domain types

/// Installer subcommand recorded in a history log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandKind {
    Create,
    Install,
    /// Any other subcommand (e.g. `remove`, `update`), kept for diagnostics
    Other(String),
}

impl CommandKind {
    pub fn from_subcommand(name: &str) -> Self {
        match name {
            "create" => CommandKind::Create,
            "install" => CommandKind::Install,
            other => CommandKind::Other(other.to_string()),
        }
    }
}

/// One recorded command recovered from an environment's history log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub kind: CommandKind,

    /// Package constraints as recorded
    pub packages: Vec<String>,

    /// Channels as recorded, in order
    pub channels: Vec<String>,
}

impl HistoryEntry {
    pub fn new(kind: CommandKind, packages: Vec<String>, channels: Vec<String>) -> Self {
        Self {
            kind,
            packages,
            channels,
        }
    }

    /// Entry for a recorded command that is neither `create` nor `install`
    pub fn other(name: impl Into<String>) -> Self {
        Self::new(CommandKind::Other(name.into()), Vec::new(), Vec::new())
    }
}
