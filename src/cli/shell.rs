use clap::Args;

/// Install grammar accepted on the command line and in `#!conda-shell` lines
///
/// This is the subset of `conda install` that conda-shell forwards, plus
/// `--run` and `-i/--interpreter`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ShellArgs {
    /// Package specs to install (e.g. python=3.6 numpy)
    #[arg(value_name = "PACKAGE")]
    pub packages: Vec<String>,

    /// Name of the environment (generated when omitted)
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Additional channel to search for packages (repeatable)
    #[arg(long = "channel", short = 'c', value_name = "CHANNEL")]
    pub channels: Vec<String>,

    /// Command to run inside the environment
    #[arg(long, value_name = "COMMAND", conflicts_with = "interpreter")]
    pub run: Option<String>,

    /// Program used to run a script from a shebang line
    #[arg(long, short = 'i')]
    pub interpreter: Option<String>,

    /// Accepted for `conda install` compatibility; always implied
    #[arg(long, short = 'y', hide = true)]
    pub yes: bool,
}
