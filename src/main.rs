//! conda-shell - disposable conda environments
//!
//! Creates (or reuses) a conda environment holding the requested packages and
//! runs a command, a script or an interactive shell inside it. Works both as a
//! regular command and as a script interpreter via `#!conda-shell` lines.

use std::env;
use std::ffi::OsString;

use clap::Parser;

mod cli;
mod commands;
mod config;
mod directive;
mod domain;
mod environment;
mod error;
mod exec;
mod history;
mod installer;
mod logging;
mod matcher;
#[cfg(test)]
mod temp;

#[cfg(test)]
mod test_fixtures;

use cli::Cli;
use commands::shell::Invocation;
use config::Config;
use error::Result;

fn run(argv: Vec<OsString>) -> Result<()> {
    let config = Config::from_env();

    // Shebang mode bypasses the CLI parser: the arguments after the script
    // belong to the script.
    if let Some(invocation) = Invocation::shebang(&argv) {
        logging::init(config.log_filter.as_deref(), false);
        tracing::debug!(?invocation, "running as script interpreter");
        return commands::shell::run(invocation, &config);
    }

    let cli = Cli::parse_from(argv);
    logging::init(config.log_filter.as_deref(), cli.verbose);

    if let Some(shell) = cli.completions {
        return commands::completions::run(shell);
    }
    commands::shell::run(Invocation::Direct(cli.shell), &config)
}

fn main() {
    if let Err(e) = run(env::args_os().collect()) {
        tracing::debug!(configuration = e.is_configuration_error(), error = ?e, "exiting");
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}
