use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::beatmap::BeatmapInfo;

/// The four osu! gamemodes as the score server numbers them.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// osu!standard
    #[default]
    Osu,
    /// osu!taiko
    Taiko,
    /// osu!catch, also known as fruits or ctb
    Catch,
    /// osu!mania
    Mania,
}

/// Priority in which a beatmap's stored star ratings are probed when no
/// score tells us the mode.
pub const MODE_PRIORITY: [(GameMode, fn(&BeatmapInfo) -> f64); 4] = [
    (GameMode::Osu, |map| map.stars_std),
    (GameMode::Taiko, |map| map.stars_taiko),
    (GameMode::Catch, |map| map.stars_ctb),
    (GameMode::Mania, |map| map.stars_mania),
];

impl GameMode {
    /// All modes in priority order.
    pub const ALL: [Self; 4] = [Self::Osu, Self::Taiko, Self::Catch, Self::Mania];

    /// Infer the mode of a beatmap from its stored star ratings.
    ///
    /// The first mode in [`MODE_PRIORITY`] with a positive rating is picked,
    /// regardless of which rating is the largest. Falls back to
    /// [`GameMode::Osu`] if the map has not been rated for any mode.
    pub fn infer(map: &BeatmapInfo) -> Self {
        MODE_PRIORITY
            .iter()
            .find(|(_, stars)| stars(map) > 0.0)
            .map_or(Self::Osu, |(mode, _)| *mode)
    }

    /// The server's numeric id of the mode.
    pub const fn id(self) -> u8 {
        match self {
            Self::Osu => 0,
            Self::Taiko => 1,
            Self::Catch => 2,
            Self::Mania => 3,
        }
    }
}

impl Display for GameMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            Self::Osu => "osu",
            Self::Taiko => "taiko",
            Self::Catch => "catch",
            Self::Mania => "mania",
        };

        f.write_str(name)
    }
}

/// Error when converting a numeric id into a [`GameMode`].
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
#[error("unknown gamemode id {0}")]
pub struct UnknownGameMode(pub u8);

impl TryFrom<u8> for GameMode {
    type Error = UnknownGameMode;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            0 => Ok(Self::Osu),
            1 => Ok(Self::Taiko),
            2 => Ok(Self::Catch),
            3 => Ok(Self::Mania),
            _ => Err(UnknownGameMode(id)),
        }
    }
}

impl From<GameMode> for rosu_pp::model::mode::GameMode {
    fn from(mode: GameMode) -> Self {
        match mode {
            GameMode::Osu => Self::Osu,
            GameMode::Taiko => Self::Taiko,
            GameMode::Catch => Self::Catch,
            GameMode::Mania => Self::Mania,
        }
    }
}
