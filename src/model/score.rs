use serde::{Deserialize, Serialize};

use super::mode::GameMode;

/// The parts of a submitted score that matter for pp.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreInfo {
    /// Accuracy as a fraction between `0.0` and `1.0`.
    pub accuracy: f64,
    /// Legacy mods bitflags.
    pub mods: u32,
    /// Maximum combo reached. `0` is a real zero-combo play.
    pub max_combo: u32,
    pub misses: u32,
    pub mode: GameMode,
}
