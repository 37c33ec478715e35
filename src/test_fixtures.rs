//! Test fixtures and utilities for reducing test setup duplication.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_fixtures::{FakeInstaller, create_temp_dir, request_with_steps};
//!
//! #[test]
//! fn my_test() {
//!     // Simple temp directory
//!     let temp = create_temp_dir();
//!
//!     // Installer that keeps its environments in a temp directory
//!     let fake = FakeInstaller::new();
//!     fake.add_env("shell_old", &["create -n shell_old -y python=3.6"]);
//!
//!     // Request with one step per package list
//!     let request = request_with_steps("shell_new", &[&["python=3.6"], &["numpy"]]);
//! }
//! ```

#![allow(clippy::expect_used)]

use std::cell::{Cell, RefCell};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::config::Config;
use crate::domain::environment::{HISTORY_FILE, META_DIR};
use crate::domain::{InstallRequest, InstallSpec, StepPackages};
use crate::error::{Result, ShellError};
use crate::installer::{CondaInstaller, Installer};

/// Create a temp directory in the system temp location.
///
/// Uses `crate::temp::temp_dir_base()` to ensure temp dirs are never
/// created under the current working directory.
///
/// # Panics
///
/// Panics if the temp directory cannot be created.
#[must_use]
pub fn create_temp_dir() -> TempDir {
    TempDir::new_in(crate::temp::temp_dir_base()).expect("Failed to create temp directory")
}

/// Request for `name` with one step per package list and no channels
///
/// # Panics
///
/// Panics if `steps` is empty.
#[must_use]
pub fn request_with_steps(name: &str, steps: &[&[&str]]) -> InstallRequest {
    let steps = steps
        .iter()
        .map(|packages| {
            StepPackages::new(packages.iter().map(ToString::to_string).collect(), Vec::new())
        })
        .collect();
    InstallRequest::new(name, None, None, steps).expect("request needs at least one step")
}

/// In-memory stand-in for conda
///
/// Environments live under `<tempdir>/envs/<name>` with a real
/// `conda-meta/history` file, written the way conda writes it, so discovery
/// and history parsing run unmodified against them.
pub struct FakeInstaller {
    root: TempDir,
    listed: RefCell<Vec<PathBuf>>,
    calls: RefCell<Vec<String>>,
    fail_on: RefCell<Option<String>>,
    forget_created: Cell<bool>,
}

impl FakeInstaller {
    #[must_use]
    pub fn new() -> Self {
        let root = create_temp_dir();
        fs::create_dir_all(root.path().join("envs")).expect("Failed to create envs directory");
        Self {
            root,
            listed: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
            fail_on: RefCell::new(None),
            forget_created: Cell::new(false),
        }
    }

    /// Configuration with the default prefix
    #[must_use]
    pub fn config(&self) -> Config {
        Config {
            conda_exe: self.root.path().join("conda"),
            ..Config::default()
        }
    }

    /// Directory of the environment called `name`
    #[must_use]
    pub fn env_path(&self, name: &str) -> PathBuf {
        self.root.path().join("envs").join(name)
    }

    /// Add an existing environment whose history holds `commands`
    ///
    /// Each command is written as `# cmd: conda <command>`.
    pub fn add_env(&self, name: &str, commands: &[&str]) {
        let path = self.env_path(name);
        fs::create_dir_all(path.join(META_DIR)).expect("Failed to create conda-meta");
        for command in commands {
            append_history(&path, command);
        }
        self.listed.borrow_mut().push(path);
    }

    /// List a path that does not exist on disk
    pub fn list_extra(&self, path: impl Into<PathBuf>) {
        self.listed.borrow_mut().push(path.into());
    }

    /// Make every step with this role (`create` or `install`) fail
    pub fn fail_on(&self, role: &str) {
        *self.fail_on.borrow_mut() = Some(role.to_string());
    }

    /// Build environments without listing them afterwards
    pub fn forget_created(&self) {
        self.forget_created.set(true);
    }

    /// Steps run so far, as `<role> <name> <packages...>`
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, spec: &InstallSpec) -> Result<PathBuf> {
        let mut call = format!("{} {}", spec.role(), spec.env_name());
        for package in spec.packages() {
            call.push(' ');
            call.push_str(package);
        }
        self.calls.borrow_mut().push(call);

        let role = spec.role().to_string();
        if self.fail_on.borrow().as_deref() == Some(role.as_str()) {
            return Err(ShellError::InstallerFailed {
                command: format!("conda {role}"),
                status: "exit status: 1".to_string(),
                code: Some(1),
            });
        }

        let path = self.env_path(spec.env_name());
        let command = CondaInstaller::step_args(spec).join(" ");
        append_history(&path, &command);
        Ok(path)
    }
}

impl Installer for FakeInstaller {
    fn environments(&self) -> Result<Vec<PathBuf>> {
        Ok(self.listed.borrow().clone())
    }

    fn create(&self, spec: &InstallSpec) -> Result<()> {
        let path = self.record(spec)?;
        if !self.forget_created.get() {
            self.listed.borrow_mut().push(path);
        }
        Ok(())
    }

    fn install(&self, spec: &InstallSpec) -> Result<()> {
        self.record(spec).map(|_| ())
    }
}

fn append_history(env: &Path, command: &str) {
    let meta = env.join(META_DIR);
    fs::create_dir_all(&meta).expect("Failed to create conda-meta");
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(meta.join(HISTORY_FILE))
        .expect("Failed to open history");
    writeln!(file, "==> 2017-06-01 12:00:00 <==").expect("Failed to write history");
    writeln!(file, "# cmd: conda {command}").expect("Failed to write history");
}
