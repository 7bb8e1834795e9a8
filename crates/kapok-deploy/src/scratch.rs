//! Chart output directories
//!
//! A [`ScratchDir`] either wraps a caller-supplied directory, which is never
//! removed, or a temporary directory Kapok created itself. An owned directory
//! is removed on drop, but only once [`ScratchDir::arm`] has been called
//! right before the install attempt.

use std::path::{Path, PathBuf};

/// Prefix of directories created under the system temp dir
pub const SCRATCH_PREFIX: &str = "kapok-";

#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
    owned: bool,
    armed: bool,
}

impl ScratchDir {
    /// Create a fresh directory under the system temp dir
    pub fn create() -> std::io::Result<Self> {
        let dir = tempfile::Builder::new().prefix(SCRATCH_PREFIX).tempdir()?;

        Ok(Self {
            // Removal is governed by `owned` and `armed`, not by TempDir
            path: dir.keep(),
            owned: true,
            armed: false,
        })
    }

    /// Wrap a caller-supplied directory
    pub fn borrowed(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            owned: false,
            armed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether Kapok created this directory
    pub fn is_owned(&self) -> bool {
        self.owned
    }

    /// Schedule removal on drop (no-op for borrowed directories)
    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Whether dropping this value removes the directory
    pub fn removes_on_drop(&self) -> bool {
        self.owned && self.armed
    }

    /// Remove an owned, armed directory now
    ///
    /// Returns whether the directory was actually removed. The guard is
    /// disarmed afterwards, so a failed removal is not retried on drop.
    pub fn cleanup(&mut self) -> bool {
        if !self.removes_on_drop() {
            return false;
        }
        self.armed = false;

        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "removed scratch directory");
                true
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to remove scratch directory"
                );
                false
            }
        }
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_owned_unarmed_is_kept() {
        let scratch = ScratchDir::create().unwrap();
        let path = scratch.path().to_path_buf();
        assert!(scratch.is_owned());
        drop(scratch);

        assert!(path.is_dir());
        std::fs::remove_dir_all(path).unwrap();
    }

    #[test]
    fn test_owned_armed_is_removed() {
        let mut scratch = ScratchDir::create().unwrap();
        let path = scratch.path().to_path_buf();
        std::fs::write(path.join("Chart.yaml"), "name: kapok\n").unwrap();

        scratch.arm();
        drop(scratch);

        assert!(!path.exists());
    }

    #[test]
    fn test_borrowed_is_never_removed() {
        let dir = TempDir::new().unwrap();
        let mut scratch = ScratchDir::borrowed(dir.path());
        scratch.arm();
        assert!(!scratch.removes_on_drop());
        drop(scratch);

        assert!(dir.path().is_dir());
    }

    #[test]
    fn test_cleanup_reports_removal() {
        let mut scratch = ScratchDir::create().unwrap();
        let path = scratch.path().to_path_buf();

        assert!(!scratch.cleanup(), "unarmed guard must not remove");
        assert!(path.is_dir());

        scratch.arm();
        assert!(scratch.cleanup());
        assert!(!path.exists());
        assert!(!scratch.removes_on_drop());
    }

    #[test]
    fn test_cleanup_failure_is_reported() {
        let mut scratch = ScratchDir::create().unwrap();
        // Gone before the guard gets to it
        std::fs::remove_dir_all(scratch.path()).unwrap();

        scratch.arm();
        assert!(!scratch.cleanup());
    }

    #[test]
    fn test_borrowed_cleanup_is_noop() {
        let dir = TempDir::new().unwrap();
        let mut scratch = ScratchDir::borrowed(dir.path());
        scratch.arm();

        assert!(!scratch.cleanup());
        assert!(dir.path().is_dir());
    }

    #[test]
    fn test_scratch_prefix() {
        let scratch = ScratchDir::create().unwrap();
        let name = scratch.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with(SCRATCH_PREFIX));

        let mut scratch = scratch;
        scratch.arm();
    }
}
