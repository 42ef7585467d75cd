//! Scratch directories for intermediate files.
//!
//! Directories are created persistent: nothing is removed on drop. Removal
//! with [`remove_scratch_dir`] is fail fast and terminates the process if the
//! directory cannot be removed (for example because it is not empty).

use std::{
    fs,
    path::{Path, PathBuf},
    process,
};

use crate::error::ScratchError;

/// Name prefix of every scratch directory
pub const SCRATCH_PREFIX: &str = ".mqmap_tmp";

/// Create a new, uniquely named directory under the system temp directory
pub fn create_scratch_dir() -> Result<PathBuf, ScratchError> {
    create_scratch_dir_in(std::env::temp_dir())
}

/// Create a new, uniquely named directory under `parent`
pub fn create_scratch_dir_in<P: AsRef<Path>>(parent: P) -> Result<PathBuf, ScratchError> {
    let dir = tempfile::Builder::new()
        .prefix(SCRATCH_PREFIX)
        .tempdir_in(parent)
        .map_err(ScratchError::Create)?
        .keep();
    debug!("Created scratch directory {}", dir.display());
    Ok(dir)
}

/// Remove an empty scratch directory
pub fn try_remove_scratch_dir<P: AsRef<Path>>(path: P) -> Result<(), ScratchError> {
    let path = path.as_ref();
    fs::remove_dir(path).map_err(|source| ScratchError::Remove {
        path: path.to_owned(),
        source,
    })?;
    debug!("Removed scratch directory {}", path.display());
    Ok(())
}

/// Remove an empty scratch directory, exiting the process with status 1
/// on failure
pub fn remove_scratch_dir<P: AsRef<Path>>(path: P) {
    if let Err(e) = try_remove_scratch_dir(path) {
        error!("{:#}", anyhow::Error::from(e));
        process::exit(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_remove() {
        let parent = tempfile::tempdir().unwrap();
        let d1 = create_scratch_dir_in(parent.path()).unwrap();
        let d2 = create_scratch_dir_in(parent.path()).unwrap();
        assert_ne!(d1, d2);
        assert!(d1.is_dir());
        try_remove_scratch_dir(&d1).unwrap();
        assert!(!d1.exists());
        remove_scratch_dir(&d2);
        assert!(!d2.exists());
    }

    #[test]
    fn test_create_in_system_temp() {
        let d = create_scratch_dir().unwrap();
        assert!(d.starts_with(std::env::temp_dir()));
        try_remove_scratch_dir(&d).unwrap();
    }

    #[test]
    fn test_remove_non_empty_is_fatal() {
        let parent = tempfile::tempdir().unwrap();
        let d = create_scratch_dir_in(parent.path()).unwrap();
        fs::write(d.join("x.txt"), "x").unwrap();
        let e = try_remove_scratch_dir(&d).unwrap_err();
        assert!(e.is_fatal());
        assert!(d.is_dir());
    }

    const CHILD_DIR_VAR: &str = "MQMAP_SCRATCH_REMOVE_DIR";

    #[test]
    fn test_remove_non_empty_exits() {
        // When re-run as a child process, remove the directory we were given
        if let Some(d) = std::env::var_os(CHILD_DIR_VAR) {
            remove_scratch_dir(d);
            return;
        }
        let parent = tempfile::tempdir().unwrap();
        let d = create_scratch_dir_in(parent.path()).unwrap();
        fs::write(d.join("x.txt"), "x").unwrap();

        let status = process::Command::new(std::env::current_exe().unwrap())
            .args([
                "--exact",
                "scratch::tests::test_remove_non_empty_exits",
                "--test-threads=1",
            ])
            .env(CHILD_DIR_VAR, &d)
            .stdout(process::Stdio::null())
            .stderr(process::Stdio::null())
            .status()
            .unwrap();
        assert_eq!(status.code(), Some(1));
        assert!(d.join("x.txt").is_file());
    }

    #[test]
    fn test_remove_missing_is_fatal() {
        let parent = tempfile::tempdir().unwrap();
        let e = try_remove_scratch_dir(parent.path().join("absent")).unwrap_err();
        assert!(matches!(e, ScratchError::Remove { .. }));
        assert!(e.is_fatal());
    }
}
