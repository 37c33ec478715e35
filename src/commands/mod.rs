//! Command implementations for the conda-shell CLI

pub mod completions;
pub mod shell;
