//! Running things inside an activated environment
//!
//! - [`run`]: one command line, program resolved against the patched `PATH`
//! - [`repl`]: interactive loop, one command line per input line

pub mod repl;
pub mod run;

use std::ffi::OsString;

use crate::environment::EnvVars;
use crate::error::Result;

pub use repl::run_repl;
pub use run::run_command;

/// Run `command` if there is one, otherwise start the interactive shell
///
/// `extra_args` are appended to `command`; the interactive shell ignores them.
pub fn dispatch(
    command: Option<&str>,
    extra_args: &[OsString],
    env_name: &str,
    env: &EnvVars,
) -> Result<()> {
    match command {
        Some(command) => run_command(command, extra_args, env),
        None => {
            if !extra_args.is_empty() {
                tracing::warn!(count = extra_args.len(), "ignoring arguments without a command");
            }
            run_repl(env_name, env)
        }
    }
}
