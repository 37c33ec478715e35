//! Install step domain types
//!
//! An [`InstallRequest`] is the ordered, non-empty list of steps one invocation
//! asks for. It is built once by the CLI or directive parser and never mutated
//! afterwards, so the "one name, one interpreter" invariant holds by
//! construction.

use std::fmt;

use crate::error::{Result, ShellError};

/// Whether a step creates the environment or installs into it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepRole {
    Create,
    Install,
}

impl fmt::Display for StepRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepRole::Create => write!(f, "create"),
            StepRole::Install => write!(f, "install"),
        }
    }
}

/// Packages and channels of one step, before a name is assigned
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepPackages {
    /// Package constraints (`name` or `name=version`) in the order given
    pub packages: Vec<String>,

    /// Channels in the order given
    pub channels: Vec<String>,
}

impl StepPackages {
    pub fn new(packages: Vec<String>, channels: Vec<String>) -> Self {
        Self { packages, channels }
    }
}

/// One requested installation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallSpec {
    role: StepRole,
    env_name: String,
    packages: Vec<String>,
    channels: Vec<String>,
    interpreter: Option<String>,
    run_command: Option<String>,
}

impl InstallSpec {
    pub fn role(&self) -> StepRole {
        self.role
    }

    pub fn env_name(&self) -> &str {
        &self.env_name
    }

    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    pub fn channels(&self) -> &[String] {
        &self.channels
    }

    pub fn interpreter(&self) -> Option<&str> {
        self.interpreter.as_deref()
    }

    pub fn run_command(&self) -> Option<&str> {
        self.run_command.as_deref()
    }
}

/// Ordered, non-empty sequence of install steps for one environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallRequest {
    steps: Vec<InstallSpec>,
    explicit_name: bool,
}

impl InstallRequest {
    /// Build a request from per-step packages
    ///
    /// The first step becomes the `Create` step, every later one an `Install`
    /// step. All steps share `env_name`, `interpreter` and `run_command`.
    pub fn new(
        env_name: impl Into<String>,
        interpreter: Option<String>,
        run_command: Option<String>,
        steps: Vec<StepPackages>,
    ) -> Result<Self> {
        if steps.is_empty() {
            return Err(ShellError::EmptyRequest);
        }

        let env_name = env_name.into();
        let steps = steps
            .into_iter()
            .enumerate()
            .map(|(index, step)| InstallSpec {
                role: if index == 0 {
                    StepRole::Create
                } else {
                    StepRole::Install
                },
                env_name: env_name.clone(),
                packages: step.packages,
                channels: step.channels,
                interpreter: interpreter.clone(),
                run_command: run_command.clone(),
            })
            .collect();

        Ok(Self {
            steps,
            explicit_name: false,
        })
    }

    /// Mark the environment name as chosen by the user rather than generated
    #[must_use]
    pub fn with_explicit_name(mut self) -> Self {
        self.explicit_name = true;
        self
    }

    pub fn steps(&self) -> &[InstallSpec] {
        &self.steps
    }

    /// The `Create` step
    pub fn create_step(&self) -> &InstallSpec {
        &self.steps[0]
    }

    /// Every step after the `Create` step, in order
    pub fn install_steps(&self) -> &[InstallSpec] {
        &self.steps[1..]
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn env_name(&self) -> &str {
        self.create_step().env_name()
    }

    pub fn interpreter(&self) -> Option<&str> {
        self.create_step().interpreter()
    }

    pub fn run_command(&self) -> Option<&str> {
        self.create_step().run_command()
    }

    pub fn has_explicit_name(&self) -> bool {
        self.explicit_name
    }
}
