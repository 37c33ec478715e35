//! External installer seam
//!
//! conda-shell never resolves or downloads packages itself. Everything that
//! touches the package manager goes through [`Installer`]: listing the
//! environments it knows, creating one, installing into one. [`CondaInstaller`]
//! drives the real `conda` executable; tests substitute their own.

pub mod conda;

use std::path::PathBuf;

use crate::domain::InstallSpec;
use crate::error::Result;

pub use conda::CondaInstaller;

/// Operations conda-shell needs from the package manager
pub trait Installer {
    /// Every environment directory the installer knows about
    fn environments(&self) -> Result<Vec<PathBuf>>;

    /// Create the environment named by `spec` with its packages
    fn create(&self, spec: &InstallSpec) -> Result<()>;

    /// Install the packages of `spec` into its (existing) environment
    fn install(&self, spec: &InstallSpec) -> Result<()>;
}
