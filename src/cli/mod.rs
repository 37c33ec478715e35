//! CLI definitions using clap derive API
//!
//! - [`shell`]: the install grammar shared by the command line and by
//!   `#!conda-shell` directive lines

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};

pub mod shell;

pub use shell::ShellArgs;

/// conda-shell - disposable conda environments
///
/// Create (or reuse) a conda environment holding the given packages, then run a
/// command or an interactive shell inside it.
#[derive(Parser, Debug)]
#[command(
    name = "conda-shell",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Port of nix-shell for the conda package manager",
    long_about = "Port of the `nix-shell` command for the conda package manager.\n\n\
                  Packages use the `conda install` syntax. Environments are named with the \
                  CONDA_SHELL_ENV_PREFIX prefix (default `shell_`) and reused when their history \
                  matches the request exactly.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  conda-shell python=3.6 numpy=1.13              \x1b[90m# Interactive shell\x1b[0m\n   \
                  conda-shell python=2.7 --run 'python -V'       \x1b[90m# Run one command\x1b[0m\n   \
                  conda-shell -c conda-forge pydap --run pydap   \x1b[90m# Extra channel\x1b[0m\n\n\
                  \x1b[1m\x1b[32mShebang:\x1b[0m\n   \
                  #!/usr/bin/env conda-shell\n   \
                  #!conda-shell -i python python=3.6 numpy=1.12\n   \
                  #!conda-shell -c conda-forge pydap\n"
)]
pub struct Cli {
    #[command(flatten)]
    pub shell: ShellArgs,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL", hide = true)]
    pub completions: Option<clap_complete::Shell>,
}
