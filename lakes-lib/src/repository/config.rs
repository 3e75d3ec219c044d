use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    Error, Result,
    fs::{config_dir, data_dir, default_database_path, resolve},
};

const FILE_NAME: &str = "lakes.toml";
/// Environment variable that overrides the configuration file location.
pub const CONFIG_ENV: &str = "LAKES_CONFIG";

/// Handle to the shared core configuration
pub type Cfg = Arc<RwLock<CoreConfig>>;

/// The core configuration, serialized to TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub database: DatabaseConfig,
    pub window: WindowConfig,
    pub images: ImagesConfig,
    pub fetcher: FetcherConfig,
    /// Directory relative paths are resolved against. This is the directory holding the
    /// configuration file and is never written back out.
    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u16,
    pub height: u16,
    pub theme: ThemeChoice,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagesConfig {
    pub placeholder: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Article URL with a `{name}` placeholder for the lake name
    pub url_template: String,
    /// `id` attribute of the HTML element holding the article text
    pub container_id: String,
    /// Request timeout. When unset the HTTP client's default applies.
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl CoreConfig {
    /// Load the configuration from its default location, honouring [`CONFIG_ENV`].
    ///
    /// A missing file is created with default values.
    pub fn load() -> Result<Self> {
        let path = match env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => config_dir()?.join(FILE_NAME),
        };

        Self::load_from(&path)
    }

    /// Load the configuration from an explicit path, creating it with default values if
    /// it doesn't exist yet.
    pub fn load_from(path: &Path) -> Result<Self> {
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        let mut cfg = if path.exists() {
            let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
            toml::from_str(&contents).map_err(|source| Error::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            let cfg = Self::default();
            cfg.save_to(path)?;
            info!("Wrote default configuration to {}", path.display());
            cfg
        };

        // The default database lives in the data directory, which may not exist yet
        if cfg.database == DatabaseConfig::default() {
            data_dir()?;
        }

        cfg.base_dir = base_dir;
        debug!("Loaded configuration from {}", path.display());

        Ok(cfg)
    }

    /// Write the configuration to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        fs::write(path, contents).map_err(|e| Error::io(path, e))
    }

    /// Absolute path of the catalog database.
    pub fn database_path(&self) -> PathBuf {
        resolve(&self.base_dir, &self.database.path)
    }

    /// Absolute path of the placeholder image.
    pub fn placeholder_path(&self) -> PathBuf {
        resolve(&self.base_dir, &self.images.placeholder)
    }

    #[cfg(test)]
    /// Configuration rooted in `dir`, for use in tests.
    pub(crate) fn mock(dir: &Path) -> Self {
        Self {
            base_dir: dir.to_path_buf(),
            ..Self::default()
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            window: WindowConfig::default(),
            images: ImagesConfig::default(),
            fetcher: FetcherConfig::default(),
            base_dir: PathBuf::new(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            theme: ThemeChoice::default(),
        }
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            placeholder: "default.png".into(),
        }
    }
}

impl FetcherConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            url_template: "https://ru.wikipedia.org/wiki/{name}".into(),
            container_id: "bodyContent".into(),
            timeout_secs: None,
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_load_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(
            &path,
            "[database]\npath = \"catalog.db\"\n\n[window]\nwidth = 800\nheight = 480\n",
        )
        .unwrap();

        let cfg = CoreConfig::load_from(&path).unwrap();

        assert_eq!(cfg.window.width, 800);
        assert_eq!(cfg.window.height, 480);
        assert_eq!(cfg.window.theme, ThemeChoice::Light);
        assert_eq!(cfg.database_path(), dir.path().join("catalog.db"));
        assert_eq!(cfg.placeholder_path(), dir.path().join("default.png"));
        assert_eq!(cfg.fetcher, FetcherConfig::default());
    }

    #[test]
    fn test_missing_database_section_uses_data_home() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "[window]\nwidth = 800\n").unwrap();

        let cfg = CoreConfig::load_from(&path).unwrap();

        assert_eq!(cfg.database, DatabaseConfig::default());
        assert_ne!(cfg.database_path(), dir.path().join("lakes.db"));
        assert!(cfg.database_path().ends_with("lakes/lakes.db"));
    }

    #[test]
    fn test_new_file_matches_missing_section() {
        let dir = tempfile::tempdir().unwrap();
        let written = dir.path().join("written").join(FILE_NAME);
        let partial = dir.path().join(FILE_NAME);
        fs::write(&partial, "[window]\nwidth = 800\n").unwrap();

        let written = CoreConfig::load_from(&written).unwrap();
        let partial = CoreConfig::load_from(&partial).unwrap();

        assert_eq!(written.database_path(), partial.database_path());
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "[window\nwidth = ").unwrap();

        let err = CoreConfig::load_from(&path).unwrap_err();

        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_save_roundtrip_keeps_timeout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(FILE_NAME);

        let mut cfg = CoreConfig::mock(dir.path());
        cfg.fetcher.timeout_secs = Some(15);
        cfg.window.theme = ThemeChoice::Dark;
        cfg.save_to(&path).unwrap();

        let loaded = CoreConfig::load_from(&path).unwrap();

        assert_eq!(loaded.fetcher.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(loaded.window.theme, ThemeChoice::Dark);
    }

    #[test]
    fn test_absolute_database_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = CoreConfig::mock(dir.path());
        cfg.database.path = "/srv/lakes/lakes.db".into();

        assert_eq!(cfg.database_path(), PathBuf::from("/srv/lakes/lakes.db"));
    }
}
