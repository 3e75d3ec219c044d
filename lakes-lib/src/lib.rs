//! Core library for the lakes catalog.
//!
//! Everything that does not depend on a particular front end lives here: the
//! SQLite backed [`Repository`], record drafts, live search filtering, the
//! encyclopedia [`Fetcher`] and configuration handling.

use std::{io, path::PathBuf};

use thiserror::Error;

pub mod fetcher;
pub mod fs;
pub mod repository;
pub mod search;

pub use fetcher::{FetchError, Fetcher};
pub use repository::{
    Cfg, CoreConfig, Lake, LakeDraft, NO_INFORMATION, PictureChoice, Repository,
};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The catalog database could not be reached or failed for a reason other
    /// than a constraint violation.
    #[error("Catalog store error: {0}")]
    Store(#[from] rusqlite::Error),
    #[error("A lake named \"{0}\" already exists")]
    DuplicateName(String),
    #[error("No lake named \"{0}\" exists")]
    NotFound(String),
    #[error("Lake name must not be empty")]
    EmptyName,
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed configuration file {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),
    #[error("Could not determine the home directory")]
    NoHomeDirectory,
    /// A catalog call run on the blocking pool panicked or was cancelled.
    #[error("Catalog task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
