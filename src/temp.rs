//! Absolute base directory for test scratch space
//!
//! Fake environments and scripts must never land in the working tree, even
//! when `TMPDIR` is set to a relative path such as `tmp`.

use std::env;
use std::path::PathBuf;

/// Absolute directory under which temporary directories are created
pub fn temp_dir_base() -> PathBuf {
    let dir = env::temp_dir();
    if dir.is_absolute() {
        return dir;
    }

    #[cfg(windows)]
    {
        env::var_os("TEMP")
            .or_else(|| env::var_os("TMP"))
            .map_or_else(|| PathBuf::from("C:\\Windows\\Temp"), PathBuf::from)
    }
    #[cfg(not(windows))]
    {
        PathBuf::from("/tmp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_is_absolute() {
        assert!(temp_dir_base().is_absolute());
    }
}
