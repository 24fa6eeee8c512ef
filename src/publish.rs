//! Publishing built executables as symlinks
//!
//! A link named after the executable is placed in the link directory. An
//! existing symlink is replaced; any other file in the way is left alone and
//! the creation error is reported.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::BuildError;

/// Compute where the link for `executable` goes
pub fn link_path(link_dir: &Path, executable: &Path) -> Result<PathBuf, BuildError> {
    let name = executable
        .file_name()
        .ok_or_else(|| BuildError::InvalidProject {
            path: executable.to_path_buf(),
        })?;
    Ok(link_dir.join(name))
}

/// Create or replace the symlink exposing `executable` in `link_dir`
///
/// The target is not required to exist. Returns the link path.
///
/// # Errors
/// * `BuildError::Link` - If removing the old link or creating the new one fails
pub fn publish_executable(link_dir: &Path, executable: &Path) -> Result<PathBuf, BuildError> {
    let link = link_path(link_dir, executable)?;
    tracing::info!(
        "linking executable {:?} -> {:?}",
        link.display().to_string(),
        executable.display().to_string()
    );

    let link_error = |source: io::Error| BuildError::Link {
        link: link.clone(),
        target: executable.to_path_buf(),
        source,
    };

    if is_symlink(&link) {
        tracing::debug!("Removing existing link {}", link.display());
        fs::remove_file(&link).map_err(link_error)?;
    }
    symlink(executable, &link).map_err(link_error)?;

    Ok(link)
}

/// Whether `path` itself is a symlink (dangling links included)
fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}

#[cfg(unix)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_link_path() {
        let link = link_path(Path::new("/srv/tools"), Path::new("/srv/tools/src/pad/pad")).unwrap();
        assert_eq!(link, PathBuf::from("/srv/tools/pad"));
    }

    #[test]
    fn test_publish_creates_link() {
        let dir = TempDir::new().unwrap();
        let exe = dir.path().join("src").join("lf").join("lf");

        let link = publish_executable(dir.path(), &exe).unwrap();

        assert_eq!(link, dir.path().join("lf"));
        assert_eq!(fs::read_link(&link).unwrap(), exe);
    }

    #[test]
    fn test_publish_replaces_existing_link() {
        let dir = TempDir::new().unwrap();
        let old = dir.path().join("old").join("nr");
        let new = dir.path().join("new").join("nr");

        publish_executable(dir.path(), &old).unwrap();
        let link = publish_executable(dir.path(), &new).unwrap();

        assert_eq!(fs::read_link(&link).unwrap(), new);
        let links = fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(links, 1);
    }

    #[test]
    fn test_publish_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let exe = dir.path().join("src").join("pad").join("pad");

        let first = publish_executable(dir.path(), &exe).unwrap();
        let second = publish_executable(dir.path(), &exe).unwrap();

        assert_eq!(first, second);
        assert_eq!(fs::read_link(&second).unwrap(), exe);
    }

    #[test]
    fn test_publish_refuses_regular_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("pad"), "not a link").unwrap();

        let err = publish_executable(dir.path(), Path::new("/src/pad/pad")).unwrap_err();

        match err {
            BuildError::Link { source, .. } => {
                assert_eq!(source.kind(), io::ErrorKind::AlreadyExists);
            }
            other => panic!("Expected Link error, got {:?}", other),
        }
        assert_eq!(fs::read_to_string(dir.path().join("pad")).unwrap(), "not a link");
    }

    #[test]
    fn test_publish_missing_link_dir() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing");

        let err = publish_executable(&missing, Path::new("/src/pad/pad")).unwrap_err();
        assert!(matches!(err, BuildError::Link { .. }));
    }
}
