use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use parking_lot::RwLock;
use ruprojectgames_lib::{Result, filter::Tab, fs::config_dir};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub use crate::config::theme::Theme;

mod theme;

const FILE_NAME: &str = "gui.toml";

/// Handle to the front end's own configuration
pub type Cfg = Arc<RwLock<GuiConfig>>;

/// Look and remembered state of the window, serialized to TOML.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    pub theme: Theme,
    pub listing: Listing,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Listing {
    pub last_tab: Tab,
}

impl GuiConfig {
    pub fn path() -> Result<PathBuf> {
        Ok(config_dir()?.join(FILE_NAME))
    }

    /// Load from the default location. The window must come up no matter what, so any problem
    /// is logged and the defaults are used.
    pub fn load() -> Self {
        match Self::path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                warn!("{e}, using the default GUI configuration");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            let cfg = Self::default();
            if let Err(e) = cfg.save_to(path) {
                warn!("Failed to write {}: {e}", path.display());
            }
            return cfg;
        }

        match fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                warn!("Failed to parse {}: {e}", path.display());
                Self::default()
            }),
            Err(e) => {
                warn!("Failed to read {}: {e}", path.display());
                Self::default()
            }
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

    pub fn theme(&self) -> iced::Theme {
        (&self.theme).into()
    }

    pub fn into_handle(self) -> Cfg {
        Arc::new(RwLock::new(self))
    }
}

#[cfg(test)]
mod test {
    use ruprojectgames_lib::Game;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_missing_file_is_created() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);

        let cfg = GuiConfig::load_from(&path);

        assert_eq!(cfg, GuiConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_last_tab_survives_a_restart() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);

        let cfg = GuiConfig {
            theme: Theme::Light,
            listing: Listing {
                last_tab: Tab::Game(Game::Witcher3),
            },
        };
        cfg.save_to(&path).unwrap();

        assert_eq!(GuiConfig::load_from(&path), cfg);
    }

    #[test]
    fn test_garbage_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(FILE_NAME);
        fs::write(&path, "theme = 42").unwrap();

        assert_eq!(GuiConfig::load_from(&path), GuiConfig::default());
    }
}
