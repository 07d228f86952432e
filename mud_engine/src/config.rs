//! Runtime configuration read from `config.toml` in the data directory.
//!
//! A missing or unreadable file is not an error; the defaults are used and a
//! warning is logged.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::data_paths::{data_path, data_root};
use crate::normalize::{Identity, PersianForms, TextNormalizer};
use crate::save_files::SAVE_DIR;

/// Settings for one run of the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MudConfig {
    /// Overrides the detected data directory.
    pub data_dir: Option<PathBuf>,
    pub lexicon_file: String,
    pub world_file: String,
    pub responses_file: String,
    pub save_dir: PathBuf,
    /// Unify Arabic/Persian letter forms in input and entity keys.
    pub normalize_persian: bool,
    /// Wrap width for terminal output; `None` uses the terminal width.
    pub wrap_width: Option<usize>,
}

impl Default for MudConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            lexicon_file: "lexicon.toml".to_string(),
            world_file: "world.ron".to_string(),
            responses_file: "responses.toml".to_string(),
            save_dir: PathBuf::from(SAVE_DIR),
            normalize_persian: true,
            wrap_width: None,
        }
    }
}

impl MudConfig {
    /// Load `config.toml` from the detected data directory.
    pub fn load_default() -> MudConfig {
        Self::load(&data_path("config.toml"))
    }

    /// Load configuration from `path`, falling back to defaults on any failure.
    pub fn load(path: &Path) -> MudConfig {
        match Self::try_load(path) {
            Ok(config) => {
                info!("configuration loaded from '{}'", path.display());
                config
            },
            Err(e) => {
                warn!("Could not load configuration from '{}': {e:#}. Using defaults.", path.display());
                MudConfig::default()
            },
        }
    }

    fn try_load(path: &Path) -> Result<MudConfig> {
        let text = fs::read_to_string(path).with_context(|| format!("reading config from '{}'", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config TOML from '{}'", path.display()))
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| data_root().to_path_buf())
    }

    pub fn lexicon_path(&self) -> PathBuf {
        self.data_dir().join(&self.lexicon_file)
    }

    pub fn world_path(&self) -> PathBuf {
        self.data_dir().join(&self.world_file)
    }

    pub fn responses_path(&self) -> PathBuf {
        self.data_dir().join(&self.responses_file)
    }

    /// The normalizer shared by the loaders and the parser.
    pub fn normalizer(&self) -> Arc<dyn TextNormalizer> {
        if self.normalize_persian {
            Arc::new(PersianForms)
        } else {
            Arc::new(Identity)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_uses_defaults() {
        let config = MudConfig::load(Path::new("/nonexistent/config.toml"));
        assert_eq!(config, MudConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "normalize_persian = false\nwrap_width = 60\n")?;
        let config = MudConfig::load(&path);
        assert!(!config.normalize_persian);
        assert_eq!(config.wrap_width, Some(60));
        assert_eq!(config.world_file, "world.ron");
        Ok(())
    }

    #[test]
    fn invalid_file_uses_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("config.toml");
        fs::write(&path, "wrap_width = \"wide\"")?;
        assert_eq!(MudConfig::load(&path), MudConfig::default());
        Ok(())
    }

    #[test]
    fn paths_resolve_under_data_dir() {
        let config = MudConfig {
            data_dir: Some(PathBuf::from("/srv/mud")),
            ..MudConfig::default()
        };
        assert_eq!(config.lexicon_path(), PathBuf::from("/srv/mud/lexicon.toml"));
        assert_eq!(config.world_path(), PathBuf::from("/srv/mud/world.ron"));
        assert_eq!(config.responses_path(), PathBuf::from("/srv/mud/responses.toml"));
    }
}
