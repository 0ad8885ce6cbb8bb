use serde::{Deserialize, Serialize};

/// What the score server knows about a beatmap before any calculation.
///
/// The stored star ratings are only used to guess the mode of manual
/// queries and for the taiko convert heuristic. A rating of `0.0` means the
/// map has not been rated for that mode.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BeatmapInfo {
    pub beatmap_id: u32,
    #[serde(default)]
    pub stars_std: f64,
    #[serde(default)]
    pub stars_taiko: f64,
    #[serde(default)]
    pub stars_ctb: f64,
    #[serde(default)]
    pub stars_mania: f64,
}

impl BeatmapInfo {
    /// Create a new [`BeatmapInfo`] without any stored star ratings.
    pub const fn new(beatmap_id: u32) -> Self {
        Self {
            beatmap_id,
            stars_std: 0.0,
            stars_taiko: 0.0,
            stars_ctb: 0.0,
            stars_mania: 0.0,
        }
    }

    /// Specify the stored osu!standard star rating.
    pub const fn stars_std(mut self, stars: f64) -> Self {
        self.stars_std = stars;

        self
    }

    /// Specify the stored osu!taiko star rating.
    pub const fn stars_taiko(mut self, stars: f64) -> Self {
        self.stars_taiko = stars;

        self
    }

    /// Specify the stored osu!catch star rating.
    pub const fn stars_ctb(mut self, stars: f64) -> Self {
        self.stars_ctb = stars;

        self
    }

    /// Specify the stored osu!mania star rating.
    pub const fn stars_mania(mut self, stars: f64) -> Self {
        self.stars_mania = stars;

        self
    }

    /// Whether the map has a positive osu!standard rating, i.e. whether it
    /// is an osu!standard map at heart.
    pub fn is_rated_std(&self) -> bool {
        self.stars_std > 0.0
    }
}
