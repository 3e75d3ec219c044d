use std::{
    fs::{self, create_dir_all},
    path::{Path, PathBuf},
};

use xdg::BaseDirectories;

use crate::{Error, Result};

const DATABASE_FILE: &str = "lakes.db";

/// Returns the path to the lakes configuration directory. If it doesn't exist when this
/// function is called, it will be created.
pub fn config_dir() -> Result<PathBuf> {
    let path = xdg_prefix()
        .get_config_home()
        .ok_or(Error::NoHomeDirectory)?;

    create_dir_all(&path).map_err(|e| Error::io(&path, e))?;

    Ok(path)
}

/// Returns the path to the lakes data directory. If it doesn't exist when this function is
/// called, it will be created.
pub fn data_dir() -> Result<PathBuf> {
    let path = xdg_prefix().get_data_home().ok_or(Error::NoHomeDirectory)?;

    create_dir_all(&path).map_err(|e| Error::io(&path, e))?;

    Ok(path)
}

/// Where the catalog database lives unless configured otherwise:
/// `$XDG_DATA_HOME/lakes/lakes.db`, or `lakes.db` next to the configuration when no
/// home directory is known. Nothing is created.
pub fn default_database_path() -> PathBuf {
    xdg_prefix()
        .get_data_home()
        .map_or_else(|| DATABASE_FILE.into(), |dir| dir.join(DATABASE_FILE))
}

/// Read a whole file into memory, attaching the path to any error.
pub fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::io(path, e))
}

/// Resolve `path` against `base` unless it is already absolute.
pub(crate) fn resolve(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

fn xdg_prefix() -> BaseDirectories {
    xdg::BaseDirectories::with_prefix("lakes")
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_resolve_relative() {
        let base = Path::new("/etc/lakes");

        assert_eq!(
            resolve(base, Path::new("lakes.db")),
            PathBuf::from("/etc/lakes/lakes.db")
        );
    }

    #[test]
    fn test_resolve_absolute() {
        let base = Path::new("/etc/lakes");

        assert_eq!(
            resolve(base, Path::new("/var/lib/lakes.db")),
            PathBuf::from("/var/lib/lakes.db")
        );
    }

    #[test]
    fn test_default_database_in_data_home() {
        let path = default_database_path();

        assert!(path.ends_with("lakes/lakes.db") || path == Path::new("lakes.db"));
    }

    #[test]
    fn test_read_bytes_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");

        let err = read_bytes(&path).unwrap_err();

        assert!(matches!(err, Error::Io { path: p, .. } if p == path));
    }
}
