//! Shell command implementation
//!
//! Both invocation modes end up here:
//! 1. Build the install request (from the command line, or from the
//!    `#!conda-shell` directives of a script)
//! 2. Reuse a matching environment or create a fresh one
//! 3. Activate it over a copy of our environment variables
//! 4. Run the command, or start the interactive shell
//! 5. Restore the variables, whatever happened in step 4

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use console::Style;

use crate::cli::ShellArgs;
use crate::config::Config;
use crate::directive;
use crate::domain::{InstallRequest, StepPackages, generate_env_name};
use crate::environment::{self, ActivatedEnv, EnvVars};
use crate::error::Result;
use crate::exec;
use crate::installer::{CondaInstaller, Installer};

/// How conda-shell was started
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// `conda-shell [OPTIONS] [PACKAGE]...`
    Direct(ShellArgs),

    /// Interpreter of an executable script; `args` follow the script path
    Shebang { script: PathBuf, args: Vec<OsString> },
}

impl Invocation {
    /// Recognize shebang mode: the first argument is an executable regular file
    ///
    /// `argv` includes the program name.
    pub fn shebang(argv: &[OsString]) -> Option<Self> {
        let script = Path::new(argv.get(1)?);
        if !directive::is_executable_script(script) {
            return None;
        }
        Some(Invocation::Shebang {
            script: script.to_path_buf(),
            args: argv[2..].to_vec(),
        })
    }
}

/// Run conda-shell against the real `conda` and our own process environment
pub fn run(invocation: Invocation, config: &Config) -> Result<()> {
    let (request, extra_args) = build_request(invocation, config)?;
    tracing::debug!(
        env = request.env_name(),
        steps = request.step_count(),
        interpreter = ?request.interpreter(),
        "install request ready"
    );
    let installer = CondaInstaller::from_config(config);
    tracing::debug!(conda = %installer.exe().display(), "using installer");

    let mut vars = EnvVars::from_process();
    execute(&installer, config, &request, &extra_args, &mut vars)
}

/// Turn an invocation into a validated request plus the arguments to append
/// to the dispatched command
///
/// Every configuration error surfaces here, before any environment is touched.
pub fn build_request(
    invocation: Invocation,
    config: &Config,
) -> Result<(InstallRequest, Vec<OsString>)> {
    match invocation {
        Invocation::Direct(args) => Ok((request_from_args(args, config)?, Vec::new())),
        Invocation::Shebang { script, args } => {
            let env_name = generate_env_name(&config.env_prefix);
            Ok((directive::parse_script(&script, env_name)?, args))
        }
    }
}

/// Single-step request from command-line arguments
///
/// `-n` names the environment and restricts reuse to that name; otherwise a
/// fresh prefixed name is generated.
pub fn request_from_args(args: ShellArgs, config: &Config) -> Result<InstallRequest> {
    if args.yes {
        tracing::debug!("-y/--yes is always implied");
    }
    let step = StepPackages::new(args.packages, args.channels);
    match args.name {
        Some(name) => {
            InstallRequest::new(name, args.interpreter, args.run, vec![step])
                .map(InstallRequest::with_explicit_name)
        }
        None => InstallRequest::new(
            generate_env_name(&config.env_prefix),
            args.interpreter,
            args.run,
            vec![step],
        ),
    }
}

/// Select an environment for `request`, activate it over `vars` and dispatch
pub fn execute(
    installer: &dyn Installer,
    config: &Config,
    request: &InstallRequest,
    extra_args: &[OsString],
    vars: &mut EnvVars,
) -> Result<()> {
    let selection = environment::select(installer, config, request, |request| {
        status("Creating", request.env_name());
    })?;
    if selection.is_reused() {
        status("Reusing", &selection.record().name);
    }
    let record = selection.into_record();

    let active = ActivatedEnv::activate(vars, &record.bin_dir())?;
    exec::dispatch(request.run_command(), extra_args, &record.name, &active)
}

fn status(verb: &str, env_name: &str) {
    let style = Style::new().for_stderr().green().bold();
    eprintln!("{} shell env \"{}\"...", style.apply_to(verb), env_name);
}
