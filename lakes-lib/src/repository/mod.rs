use std::{io::ErrorKind, path::Path, sync::Arc};

use parking_lot::RwLock;
use tracing::{info, warn};

use crate::{Error, Result, fs::read_bytes, repository::db::Db};

mod config;
mod db;

pub mod entities;

pub use config::{
    CONFIG_ENV, Cfg, CoreConfig, DatabaseConfig, FetcherConfig, ImagesConfig, ThemeChoice,
    WindowConfig,
};
pub use entities::{Lake, LakeDraft, NO_INFORMATION, PictureChoice};

/// Placeholder shipped with the library, used when the configured image is absent.
const BUNDLED_PLACEHOLDER: &[u8] = include_bytes!("../../assets/default.png");

/// Central access point for the lake catalog.
///
/// The [`Repository`] owns the location of the catalog database and the shared
/// configuration. Every operation opens its own connection, runs a single statement
/// and closes the connection again.
#[derive(Clone, Debug)]
pub struct Repository {
    db: Db,
    cfg: Cfg,
}

impl Repository {
    /// Open the catalog described by `cfg`, creating the database if necessary.
    pub fn new(cfg: Cfg) -> Result<Self> {
        let path = cfg.read().database_path();
        let db = Db::new(&path)?;

        info!("Catalog opened at {}", path.display());

        Ok(Self { db, cfg })
    }

    /// Convenience wrapper around [`Repository::new`] for an owned configuration.
    pub fn from_config(cfg: CoreConfig) -> Result<Self> {
        Self::new(Arc::new(RwLock::new(cfg)))
    }

    pub fn cfg(&self) -> Cfg {
        self.cfg.clone()
    }

    pub fn database_path(&self) -> &Path {
        self.db.path()
    }

    /// All lake names in ascending lexicographic order.
    pub fn list_names(&self) -> Result<Vec<String>> {
        Lake::list_names(&self.db)
    }

    /// Fetch the record with exactly this name.
    pub fn get(&self, name: &str) -> Result<Lake> {
        Lake::get(&self.db, name)
    }

    /// Insert a new record. Fails with [`Error::DuplicateName`] if the name is taken.
    pub fn create(&self, name: &str, picture: &[u8], description: &str) -> Result<()> {
        Lake::create(&self.db, name, picture, description)
    }

    /// Rename and rewrite the record called `old_name`. A `picture` of `None` leaves the
    /// stored image unchanged.
    pub fn update(
        &self,
        old_name: &str,
        new_name: &str,
        picture: Option<&[u8]>,
        description: &str,
    ) -> Result<()> {
        Lake::update(&self.db, old_name, new_name, picture, description)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        Lake::remove(&self.db, name)
    }

    /// Validate and normalise `draft`, then insert it. Returns the stored name.
    pub fn add_lake(&self, draft: &LakeDraft) -> Result<String> {
        let name = draft.validated_name()?;
        let picture = match draft.picture_bytes(|| self.placeholder_image())? {
            Some(bytes) => bytes,
            None => self.placeholder_image()?,
        };

        self.create(name, &picture, &draft.normalized_description())?;

        Ok(name.to_string())
    }

    /// Validate and normalise `draft`, then apply it to the record called `old_name`.
    /// Returns the stored name.
    pub fn edit_lake(&self, old_name: &str, draft: &LakeDraft) -> Result<String> {
        let name = draft.validated_name()?;
        let picture = draft.picture_bytes(|| self.placeholder_image())?;

        self.update(
            old_name,
            name,
            picture.as_deref(),
            &draft.normalized_description(),
        )?;

        Ok(name.to_string())
    }

    /// The placeholder image bytes, read from the configured path.
    pub fn placeholder_image(&self) -> Result<Vec<u8>> {
        let path = self.cfg.read().placeholder_path();

        match read_bytes(&path) {
            Err(Error::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
                warn!(
                    "Placeholder image {} not found, using the bundled one",
                    path.display()
                );
                Ok(BUNDLED_PLACEHOLDER.to_vec())
            }
            other => other,
        }
    }

    #[cfg(test)]
    /// Return a mock version of a [`Repository`] backed by a database in a temporary
    /// directory.
    pub(crate) fn mock() -> Self {
        let db = Db::temporary();
        let dir = db
            .path()
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        Self {
            db,
            cfg: Arc::new(RwLock::new(CoreConfig::mock(&dir))),
        }
    }
}
