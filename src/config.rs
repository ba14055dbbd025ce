//! Runner configuration.
//!
//! Settings come from a small TOML file:
//!
//! ```toml
//! seed = 12345          # omit for a random seed
//! gravity_ms = 1000     # gravity interval, must be > 0
//! log_file = "cube-tetris.log"
//! ```
//!
//! Every key is optional. The file is located through [`CONFIG_ENV`], then
//! [`DEFAULT_CONFIG_FILE`] in the working directory; with neither present the
//! defaults apply.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::core::GameConfig;
use crate::types::GRAVITY_MS;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CUBE_TETRIS_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "cube-tetris.toml";
pub const DEFAULT_LOG_FILE: &str = "cube-tetris.log";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("gravity_ms must be greater than zero")]
    ZeroGravity,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// Bag seed; `None` picks one at random on startup
    pub seed: Option<u32>,
    pub gravity_ms: u32,
    /// Log destination, used only when `RUST_LOG` is set
    pub log_file: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            seed: None,
            gravity_ms: GRAVITY_MS,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl RunnerConfig {
    /// Parse TOML text. `path` is only used in error messages.
    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Load from `$CUBE_TETRIS_CONFIG`, else `./cube-tetris.toml` if it
    /// exists, else defaults. A named file that is missing is an error.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(PathBuf::from(path)),
            None => Self::load_or_default(DEFAULT_CONFIG_FILE),
        }
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gravity_ms == 0 {
            return Err(ConfigError::ZeroGravity);
        }
        Ok(())
    }

    /// Core settings, drawing a random seed when none is configured.
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            seed: self.seed.unwrap_or_else(rand::random),
            gravity_ms: self.gravity_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config = RunnerConfig::from_toml_str("", Path::new("empty.toml")).unwrap();
        assert_eq!(config, RunnerConfig::default());
        assert_eq!(config.gravity_ms, 1000);
    }

    #[test]
    fn reads_all_keys() {
        let text = "seed = 42\ngravity_ms = 250\nlog_file = \"/tmp/game.log\"\n";
        let config = RunnerConfig::from_toml_str(text, Path::new("c.toml")).unwrap();
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.gravity_ms, 250);
        assert_eq!(config.log_file, PathBuf::from("/tmp/game.log"));
        assert_eq!(config.game_config(), GameConfig { seed: 42, gravity_ms: 250 });
    }

    #[test]
    fn zero_gravity_rejected() {
        let err = RunnerConfig::from_toml_str("gravity_ms = 0", Path::new("c.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ZeroGravity));
    }

    #[test]
    fn unknown_key_rejected() {
        let err = RunnerConfig::from_toml_str("level = 3", Path::new("c.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("c.toml"));
    }

    #[test]
    fn file_round_trip() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "seed = 7").unwrap();

        let config = RunnerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.gravity_ms, GRAVITY_MS);
    }

    #[test]
    fn missing_file_falls_back_only_when_optional() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        assert_eq!(
            RunnerConfig::load_or_default(&path).unwrap(),
            RunnerConfig::default()
        );
        assert!(matches!(
            RunnerConfig::from_file(&path),
            Err(ConfigError::Read { .. })
        ));
    }
}
