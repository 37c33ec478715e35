//! `conda` command-line driver

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Deserialize;

use super::Installer;
use crate::config::Config;
use crate::domain::{InstallSpec, StepRole};
use crate::error::{Result, environment, process};

/// Output of `conda info --envs --json` (only the part we read)
#[derive(Debug, Deserialize)]
struct EnvList {
    envs: Vec<PathBuf>,
}

/// Installer backed by the `conda` executable
#[derive(Debug, Clone)]
pub struct CondaInstaller {
    exe: PathBuf,
}

impl CondaInstaller {
    pub fn new(exe: impl Into<PathBuf>) -> Self {
        Self { exe: exe.into() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.conda_exe.clone())
    }

    pub fn exe(&self) -> &Path {
        &self.exe
    }

    /// Arguments for the `create`/`install` invocation of one step
    ///
    /// `-y` keeps conda from prompting; channels precede packages.
    pub fn step_args(spec: &InstallSpec) -> Vec<String> {
        let subcommand = match spec.role() {
            StepRole::Create => "create",
            StepRole::Install => "install",
        };

        let mut args = vec![
            subcommand.to_string(),
            "-n".to_string(),
            spec.env_name().to_string(),
            "-y".to_string(),
        ];
        for channel in spec.channels() {
            args.push("-c".to_string());
            args.push(channel.clone());
        }
        args.extend(spec.packages().iter().cloned());
        args
    }

    fn command_line(&self, args: &[String]) -> String {
        std::iter::once(self.exe.to_string_lossy().into_owned())
            .chain(args.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn run_step(&self, spec: &InstallSpec) -> Result<()> {
        let args = Self::step_args(spec);
        let command_line = self.command_line(&args);
        tracing::info!(command = %command_line, "running installer");

        // conda's progress output goes to our stderr so a script's stdout stays clean.
        let status = Command::new(&self.exe)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(io::stderr())
            .status()
            .map_err(|e| {
                process::installer_spawn_failed(self.exe.display().to_string(), e.to_string())
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(process::installer_failed(command_line, status))
        }
    }
}

impl Installer for CondaInstaller {
    fn environments(&self) -> Result<Vec<PathBuf>> {
        let output = Command::new(&self.exe)
            .args(["info", "--envs", "--json"])
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|e| {
                process::installer_spawn_failed(self.exe.display().to_string(), e.to_string())
            })?;

        if !output.status.success() {
            return Err(environment::list_failed(format!(
                "`{} info --envs --json` exited with {}",
                self.exe.display(),
                output.status
            )));
        }

        let list: EnvList = serde_json::from_slice(&output.stdout)?;
        tracing::debug!(count = list.envs.len(), "listed conda environments");
        Ok(list.envs)
    }

    fn create(&self, spec: &InstallSpec) -> Result<()> {
        self.run_step(spec)
    }

    fn install(&self, spec: &InstallSpec) -> Result<()> {
        self.run_step(spec)
    }
}
