use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Error, Result, fs::config_dir};

const CURRENT_CONFIG_VERSION: u16 = 1;
const FILE_NAME: &str = "core.toml";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Shared handle to the core configuration
pub type Cfg = Arc<RwLock<CoreConfig>>;

/// The core configuration, serialized to TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    version: u16,
    pub endpoints: Endpoints,
    /// Upper bound for a single request, connection and body included
    pub request_timeout_secs: u64,
}

/// Locations of the remote catalogue functions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Endpoints {
    pub list: String,
    pub auth: String,
    pub create: String,
    pub delete: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            list: "http://127.0.0.1:8080/get-translations".into(),
            auth: "http://127.0.0.1:8080/check-password".into(),
            create: "http://127.0.0.1:8080/add-translation".into(),
            delete: "http://127.0.0.1:8080/delete-translation".into(),
        }
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            endpoints: Endpoints::default(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl CoreConfig {
    /// Default location of the configuration file.
    pub fn path() -> Result<PathBuf> {
        Ok(config_dir()?.join(FILE_NAME))
    }

    /// Load the configuration from its default location, writing the defaults if there is no
    /// file yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load the configuration from `path`. A missing file is created with the defaults; an
    /// unparsable one is left alone and the defaults are used instead.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            match Self::parse(path, &contents) {
                Ok(cfg) => Ok(cfg),
                Err(e) => {
                    warn!("{e}, falling back to defaults");
                    Ok(Self::default())
                }
            }
        } else {
            let cfg = Self::default();
            cfg.save_to(path)?;
            debug!("Wrote default configuration to {}", path.display());
            Ok(cfg)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, contents)?;

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn version(&self) -> u16 {
        self.version
    }

    /// Wrap the configuration in a shared [`Cfg`] handle.
    pub fn into_handle(self) -> Cfg {
        Arc::new(RwLock::new(self))
    }

    fn parse(path: &Path, contents: &str) -> Result<Self> {
        let cfg: Self = toml::from_str(contents).map_err(|e| Error::ConfigParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        if cfg.version > CURRENT_CONFIG_VERSION {
            warn!(
                "Configuration version {} is newer than supported version {}",
                cfg.version, CURRENT_CONFIG_VERSION
            );
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod test {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_load_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join(FILE_NAME);

        let cfg = CoreConfig::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(cfg, CoreConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);

        let mut cfg = CoreConfig::default();
        cfg.endpoints.list = "https://example.org/list".into();
        cfg.request_timeout_secs = 3;
        cfg.save_to(&path).unwrap();

        let loaded = CoreConfig::load_from(&path).unwrap();

        assert_eq!(loaded, cfg);
        assert_eq!(loaded.request_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_partial_file_uses_defaults_for_the_rest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "[endpoints]\nauth = \"https://example.org/auth\"\n").unwrap();

        let cfg = CoreConfig::load_from(&path).unwrap();

        assert_eq!(cfg.endpoints.auth, "https://example.org/auth");
        assert_eq!(cfg.endpoints.list, Endpoints::default().list);
        assert_eq!(cfg.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "this is = = not toml").unwrap();

        let cfg = CoreConfig::load_from(&path).unwrap();

        assert_eq!(cfg, CoreConfig::default());
        // The broken file is left for the user to fix
        assert_eq!(fs::read_to_string(&path).unwrap(), "this is = = not toml");
    }

    #[test]
    fn test_zero_timeout_is_clamped() {
        let cfg = CoreConfig {
            request_timeout_secs: 0,
            ..Default::default()
        };

        assert_eq!(cfg.request_timeout(), Duration::from_secs(1));
    }
}
