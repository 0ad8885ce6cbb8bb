use std::{
    env::{self, VarError},
    path::PathBuf,
    str::FromStr,
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::mode::GameMode;

const DEFAULT_BEATMAPS_FOLDER: &str = "/data/.data/beatmaps";

/// Which engine calculates a mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineKind {
    /// Calculate through [`RosuEngine`](crate::engine::RosuEngine).
    #[default]
    Rosu,
    /// Don't calculate the mode at all.
    #[serde(rename = "none")]
    Disabled,
}

impl FromStr for EngineKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rosu" | "rosu-pp" | "rosupp" => Ok(Self::Rosu),
            "none" | "disabled" => Ok(Self::Disabled),
            _ => Err(ConfigError::UnknownEngine(s.to_owned())),
        }
    }
}

/// Engine choice for every mode.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub std: EngineKind,
    pub taiko: EngineKind,
    pub ctb: EngineKind,
    pub mania: EngineKind,
}

impl EngineConfig {
    /// The engine configured for the given mode.
    pub const fn get(&self, mode: GameMode) -> EngineKind {
        match mode {
            GameMode::Osu => self.std,
            GameMode::Taiko => self.taiko,
            GameMode::Catch => self.ctb,
            GameMode::Mania => self.mania,
        }
    }

    fn get_mut(&mut self, mode: GameMode) -> &mut EngineKind {
        match mode {
            GameMode::Osu => &mut self.std,
            GameMode::Taiko => &mut self.taiko,
            GameMode::Catch => &mut self.ctb,
            GameMode::Mania => &mut self.mania,
        }
    }
}

/// Settings of the pp calculation, resolved once at startup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PpConfig {
    /// Folder in which `.osu` files are cached.
    pub beatmaps_folder: PathBuf,
    pub engines: EngineConfig,
}

impl Default for PpConfig {
    fn default() -> Self {
        Self {
            beatmaps_folder: PathBuf::from(DEFAULT_BEATMAPS_FOLDER),
            engines: EngineConfig::default(),
        }
    }
}

impl PpConfig {
    /// Read the config from the environment after loading a `.env` file if
    /// there is one.
    ///
    /// | Variable | Default |
    /// | - | - |
    /// | `BEATMAPS_FOLDER` | `/data/.data/beatmaps` |
    /// | `PP_ENGINE_STD` | `rosu` |
    /// | `PP_ENGINE_TAIKO` | `rosu` |
    /// | `PP_ENGINE_CTB` | `rosu` |
    /// | `PP_ENGINE_MANIA` | `rosu` |
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenv::dotenv() {
            tracing::debug!(%err, "No .env file loaded");
        }

        Self::from_lookup(|key| env::var(key))
    }

    /// Build the config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Result<String, VarError>,
    {
        let var = |key: &'static str| match lookup(key) {
            Ok(value) if value.trim().is_empty() => Ok(None),
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(key)),
        };

        let mut config = Self::default();

        if let Some(folder) = var("BEATMAPS_FOLDER")? {
            config.beatmaps_folder = PathBuf::from(folder);
        }

        for (mode, key) in [
            (GameMode::Osu, "PP_ENGINE_STD"),
            (GameMode::Taiko, "PP_ENGINE_TAIKO"),
            (GameMode::Catch, "PP_ENGINE_CTB"),
            (GameMode::Mania, "PP_ENGINE_MANIA"),
        ] {
            if let Some(value) = var(key)? {
                *config.engines.get_mut(mode) = value.parse()?;
            }
        }

        Ok(config)
    }
}

/// Errors while reading a [`PpConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown pp engine `{0}`")]
    UnknownEngine(String),
    #[error("environment variable `{0}` is not valid unicode")]
    NotUnicode(&'static str),
}
