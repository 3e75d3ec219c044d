use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::Arc;

use rusqlite::{Connection, ErrorCode};
use tracing::{debug, warn};

use crate::{Error, Result};

/// Location of the catalog database.
///
/// No connection is held between operations: every call to [`Db::connect`] opens a fresh
/// connection which is closed again when it is dropped.
#[derive(Debug, Clone)]
pub(crate) struct Db {
    path: PathBuf,
    /// Keeps the temporary directory of a mock database alive
    #[cfg(test)]
    _dir: Option<Arc<tempfile::TempDir>>,
}

impl Db {
    /// Open the database at `path`, creating the file and schema if needed.
    pub fn new(path: &Path) -> Result<Self> {
        let db = Self {
            path: path.to_path_buf(),
            #[cfg(test)]
            _dir: None,
        };

        db.init()?;

        Ok(db)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn connect(&self) -> Result<Connection> {
        Connection::open(&self.path).map_err(|e| {
            warn!("Failed to open {}: {e}", self.path.display());
            Error::Store(e)
        })
    }

    fn init(&self) -> Result<()> {
        let conn = self.connect()?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS lakes (
                name        TEXT NOT NULL UNIQUE PRIMARY KEY,
                picture     BLOB NOT NULL,
                description TEXT NOT NULL
            )",
            [],
        )?;

        debug!("Catalog schema ready at {}", self.path.display());

        Ok(())
    }

    /// Create a database in a fresh temporary directory for use in tests
    #[cfg(test)]
    pub(crate) fn temporary() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let db = Self {
            path: dir.path().join("lakes.db"),
            _dir: Some(Arc::new(dir)),
        };

        db.init().unwrap();

        db
    }
}

/// Map a failed INSERT or UPDATE, turning a uniqueness violation into
/// [`Error::DuplicateName`].
pub(crate) fn map_write_error(err: rusqlite::Error, name: &str) -> Error {
    match err {
        rusqlite::Error::SqliteFailure(ref failure, _)
            if failure.code == ErrorCode::ConstraintViolation =>
        {
            warn!("Unique violation for lake name {name}");
            Error::DuplicateName(name.into())
        }
        other => {
            warn!("Catalog write failed: {other}");
            Error::Store(other)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_new_creates_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.db");

        let db = Db::new(&path).unwrap();

        assert!(path.exists());
        let count: i64 = db
            .connect()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM lakes", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn test_new_unreachable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("catalog.db");

        let err = Db::new(&path).unwrap_err();

        assert!(matches!(err, Error::Store(_)));
    }
}
