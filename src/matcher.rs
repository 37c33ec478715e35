//! Reuse matcher
//!
//! An environment may be reused only when its recorded history is exactly the
//! requested steps, in order: one `create`/`install` entry per step, each with
//! the same packages and channels, nothing missing and nothing extra. Any other
//! recorded command disqualifies the environment, since its state is then no
//! longer a function of the requested steps alone.
//!
//! Packages and channels are compared as sets. Channel order changes solver
//! priority for conda but not the identity of what a step asked for.

use std::collections::BTreeSet;

use crate::domain::{CommandKind, HistoryEntry, InstallRequest, InstallSpec};

/// Why a history was rejected, for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// A command other than create/install was recorded
    ForeignCommand { position: usize, name: String },

    /// More recorded commands than requested steps
    ExtraHistory { position: usize },

    /// The entry at `position` differs from the step it was compared with
    StepDiffers { position: usize, step: usize },

    /// The history ended after `matched` of `requested` steps
    Incomplete { matched: usize, requested: usize },
}

/// Compare a history against a request
///
/// Single left-to-right pass with a cursor into the requested steps; the first
/// difference rejects.
pub fn check(history: &[HistoryEntry], request: &InstallRequest) -> Result<(), Mismatch> {
    let steps = request.steps();
    let mut cursor = 0;

    for (position, entry) in history.iter().enumerate() {
        if let CommandKind::Other(name) = &entry.kind {
            return Err(Mismatch::ForeignCommand {
                position,
                name: name.clone(),
            });
        }

        let Some(step) = steps.get(cursor) else {
            return Err(Mismatch::ExtraHistory { position });
        };
        if !entry_matches(entry, step) {
            return Err(Mismatch::StepDiffers {
                position,
                step: cursor,
            });
        }
        cursor += 1;
    }

    if cursor == steps.len() {
        Ok(())
    } else {
        Err(Mismatch::Incomplete {
            matched: cursor,
            requested: steps.len(),
        })
    }
}

/// Whether an environment with `history` satisfies `request` exactly
#[allow(dead_code)] // used in tests
pub fn matches(history: &[HistoryEntry], request: &InstallRequest) -> bool {
    check(history, request).is_ok()
}

fn entry_matches(entry: &HistoryEntry, step: &InstallSpec) -> bool {
    as_set(&entry.packages) == as_set(step.packages())
        && as_set(&entry.channels) == as_set(step.channels())
}

fn as_set(items: &[String]) -> BTreeSet<&str> {
    items.iter().map(String::as_str).collect()
}
