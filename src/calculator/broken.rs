use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::{
    engine::Evaluation,
    model::{beatmap::BeatmapInfo, mode::GameMode},
};

/// Star ratings above this indicate a corrupt or degenerate beatmap.
pub const MAX_PLAUSIBLE_STARS: f64 = 20.0;

/// Taiko pp above this on an osu!standard map point to a broken convert.
pub const TAIKO_CONVERT_MAX_PP: f64 = 800.0;

/// Reason why an evaluation was deemed implausible and sanitized.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BrokenResult {
    /// The star rating exceeded [`MAX_PLAUSIBLE_STARS`].
    ImplausibleStars,
    /// A taiko calculation on an osu!standard map exceeded
    /// [`TAIKO_CONVERT_MAX_PP`].
    TaikoConvert,
}

impl BrokenResult {
    /// Check an evaluation for implausible values.
    pub fn detect(mode: GameMode, map: &BeatmapInfo, eval: &Evaluation) -> Option<Self> {
        if eval.stars > MAX_PLAUSIBLE_STARS {
            Some(Self::ImplausibleStars)
        } else if mode == GameMode::Taiko && map.is_rated_std() && eval.pp > TAIKO_CONVERT_MAX_PP
        {
            Some(Self::TaikoConvert)
        } else {
            None
        }
    }
}

impl Display for BrokenResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::ImplausibleStars => f.write_str("implausible star rating"),
            Self::TaikoConvert => f.write_str("implausible pp for taiko convert"),
        }
    }
}
