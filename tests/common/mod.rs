//! Common test utilities for conda-shell integration tests
//!
//! Tests never talk to a real conda. [`TestConda`] writes a small shell script
//! that answers `info --envs --json`, `create` and `install` the way conda
//! does: environments go under `<temp>/envs/<name>` and every change is
//! appended to `conda-meta/history`.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Prefix used for environments created by the tests
#[allow(dead_code)]
pub const TEST_PREFIX: &str = "__testme_shell_";

const FAKE_CONDA: &str = r##"#!/bin/sh
ROOT="__ROOT__"
ENVS="$ROOT/envs"

case "$1" in
  info)
    printf '{"envs": ['
    sep=""
    for dir in "$ENVS"/*/; do
      [ -d "$dir" ] || continue
      printf '%s"%s"' "$sep" "${dir%/}"
      sep=", "
    done
    printf '], "active_prefix": null}\n'
    ;;
  create|install)
    sub="$1"
    shift
    name=""
    prev=""
    for arg in "$@"; do
      [ "$prev" = "-n" ] && name="$arg"
      prev="$arg"
    done
    printf '%s %s\n' "$sub" "$*" >> "$ROOT/calls.log"
    if [ "$FAKE_CONDA_FAIL" = "$sub" ]; then
      echo "CondaError: failing $sub on request" >&2
      exit 3
    fi
    env="$ENVS/$name"
    mkdir -p "$env/conda-meta" "$env/bin"
    echo "==> 2017-06-01 12:00:00 <==" >> "$env/conda-meta/history"
    echo "# cmd: $0 $sub $*" >> "$env/conda-meta/history"
    printf '#!/bin/sh\necho "env:%s $*"\n' "$name" > "$env/bin/whoami-env"
    chmod +x "$env/bin/whoami-env"
    echo "Preparing transaction: done"
    ;;
  *)
    echo "fake conda: unsupported command: $*" >&2
    exit 2
    ;;
esac
"##;

/// A scratch conda installation for one test
#[allow(dead_code)]
pub struct TestConda {
    /// Temporary directory holding the fake conda, its environments and data
    pub temp: TempDir,
}

#[allow(dead_code)]
impl TestConda {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path();
        fs::create_dir_all(root.join("envs")).expect("Failed to create envs directory");
        fs::create_dir_all(root.join("data")).expect("Failed to create data directory");

        let script = FAKE_CONDA.replace("__ROOT__", &root.to_string_lossy());
        let conda = root.join("conda");
        fs::write(&conda, script).expect("Failed to write fake conda");
        make_executable(&conda);

        Self { temp }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn conda_exe(&self) -> PathBuf {
        self.root().join("conda")
    }

    /// conda-shell wired to this installation
    pub fn command(&self) -> Command {
        let mut cmd = conda_shell_cmd();
        cmd.env("CONDA_SHELL_CONDA_EXE", self.conda_exe())
            .env("CONDA_SHELL_ENV_PREFIX", TEST_PREFIX)
            .env("XDG_DATA_HOME", self.root().join("data"))
            .env_remove("CONDA_SHELL_LOG");
        cmd
    }

    /// Names of the environments that exist, sorted
    pub fn env_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.root().join("envs"))
            .expect("Failed to read envs directory")
            .map(|entry| {
                entry
                    .expect("Failed to read envs entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }

    /// `create`/`install` invocations the fake conda received, in order
    pub fn calls(&self) -> Vec<String> {
        fs::read_to_string(self.root().join("calls.log"))
            .map(|log| log.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Write an executable script into the temp directory
    pub fn write_script(&self, name: &str, content: &str) -> PathBuf {
        let path = self.root().join(name);
        fs::write(&path, content).expect("Failed to write script");
        make_executable(&path);
        path
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn conda_shell_cmd() -> Command {
    Command::cargo_bin("conda-shell").expect("conda-shell binary should be built")
}

#[allow(dead_code)]
fn make_executable(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))
            .expect("Failed to set permissions");
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
}
