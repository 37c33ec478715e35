//! Single command execution

use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

use crate::environment::EnvVars;
use crate::environment::activation::PATH_VAR;
use crate::error::{Result, process};

/// Split `command_line`, append `extra_args` and run it with exactly `env`
///
/// The child inherits our stdio. A non-zero exit is an error carrying the
/// child's status so the caller can mirror it.
pub fn run_command(command_line: &str, extra_args: &[OsString], env: &EnvVars) -> Result<()> {
    let words = shlex::split(command_line)
        .ok_or_else(|| process::invalid_command_line(command_line))?;
    let Some((program, args)) = words.split_first() else {
        return Err(process::invalid_command_line(command_line));
    };

    let resolved = resolve_program(program, env)?;
    tracing::debug!(program = %resolved.display(), ?args, ?extra_args, "running command");

    let status = Command::new(&resolved)
        .args(args)
        .args(extra_args)
        .env_clear()
        .envs(env.iter())
        .status()
        .map_err(|e| process::command_spawn_failed(program.as_str(), e.to_string()))?;

    if status.success() {
        Ok(())
    } else {
        Err(process::command_failed(command_line, status))
    }
}

/// Locate `program` on the `PATH` of `env`
///
/// Names containing a path separator are resolved relative to the current
/// directory instead.
pub fn resolve_program(program: &str, env: &EnvVars) -> Result<PathBuf> {
    let cwd = env::current_dir()?;
    which::which_in(program, env.get(PATH_VAR), cwd)
        .map_err(|e| process::command_spawn_failed(program, e.to_string()))
}
