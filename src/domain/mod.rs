//! Domain models for conda-shell
//!
//! This module contains pure domain objects: requested install steps, recorded
//! history entries and environment candidates. They carry the invariants the
//! rest of the crate relies on and do no I/O of their own.

pub mod environment;
pub mod history;
pub mod install_spec;

pub use environment::{EnvironmentRecord, generate_env_name};
pub use history::{CommandKind, HistoryEntry};
pub use install_spec::{InstallRequest, InstallSpec, StepPackages, StepRole};
