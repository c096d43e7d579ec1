//! Directory helpers

use std::fs;
use std::path::Path;

/// Name of the log directory an experiment needs to be viewable in TensorBoard.
pub const TENSORBOARD_DIR: &str = "tensorboard";

/// Create `path` and its parents, tolerating failure.
///
/// Returns whether the directory exists afterwards. Failures are logged when
/// `warn_on_failure` is set and are otherwise ignored.
pub fn ensure_dir(path: &Path, warn_on_failure: bool) -> bool {
    match fs::create_dir_all(path) {
        Ok(()) => true,
        Err(e) => {
            if warn_on_failure {
                tracing::warn!(
                    "Failed to make directory {} (might already exist): {}",
                    path.display(),
                    e
                );
            }
            path.is_dir()
        }
    }
}

/// Whether `dir` is a directory that directly contains a `tensorboard` entry.
pub fn has_tensorboard(dir: &Path) -> bool {
    dir.is_dir() && dir.join(TENSORBOARD_DIR).exists()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_creates_nested() {
        let tmp = TempDir::new().expect("tmp");
        let nested = tmp.path().join("a").join("b").join("c");
        assert!(ensure_dir(&nested, false));
        assert!(nested.is_dir());
        // Second call is a no-op.
        assert!(ensure_dir(&nested, true));
    }

    #[test]
    fn test_ensure_dir_over_file_fails_quietly() {
        let tmp = TempDir::new().expect("tmp");
        let file = tmp.path().join("taken");
        fs::write(&file, "x").expect("write");
        assert!(!ensure_dir(&file, true));
    }

    #[test]
    fn test_has_tensorboard() {
        let tmp = TempDir::new().expect("tmp");
        let exp = tmp.path().join("exp");
        fs::create_dir_all(exp.join("tensorboard")).expect("mkdir");
        let plain = tmp.path().join("plain");
        fs::create_dir_all(plain.join("logs")).expect("mkdir");

        assert!(has_tensorboard(&exp));
        assert!(!has_tensorboard(&plain));
        assert!(!has_tensorboard(&tmp.path().join("missing")));
        assert!(!has_tensorboard(&exp.join("tensorboard").join("nested")));
    }
}
