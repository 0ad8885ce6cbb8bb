use crate::{
    engine::EvaluationParams,
    model::{beatmap::BeatmapInfo, mode::GameMode, mods::Mods, score::ScoreInfo},
};

/// Where the parameters of a [`CalculationRequest`] came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Origin {
    /// Taken from a submitted score.
    Score,
    /// Passed by hand, e.g. by a chat bot.
    Manual,
}

/// The parameters of a calculation.
///
/// Either all values stem from a score or all of them were given manually;
/// the two are never mixed.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CalculationRequest {
    origin: Origin,
    accuracy: Option<f64>,
    mods: u32,
    combo: Option<u32>,
    misses: Option<u32>,
    mode: GameMode,
}

impl CalculationRequest {
    /// Take everything from a score, including its mode.
    pub fn from_score(score: &ScoreInfo) -> Self {
        Self {
            origin: Origin::Score,
            accuracy: Some(score.accuracy * 100.0),
            mods: score.mods,
            combo: Some(score.max_combo),
            misses: Some(score.misses),
            mode: score.mode,
        }
    }

    /// Use the given accuracy (`0.0..=100.0`) and mods, assume a full
    /// combo without misses, and infer the mode from the beatmap.
    pub fn manual(map: &BeatmapInfo, accuracy: Option<f64>, mods: u32) -> Self {
        Self {
            origin: Origin::Manual,
            accuracy,
            mods,
            combo: None,
            misses: None,
            mode: GameMode::infer(map),
        }
    }

    pub const fn origin(&self) -> Origin {
        self.origin
    }

    /// Accuracy between `0.0` and `100.0`.
    pub const fn accuracy(&self) -> Option<f64> {
        self.accuracy
    }

    /// The mods as given, including bits the engine does not know.
    pub const fn mods(&self) -> u32 {
        self.mods
    }

    pub const fn combo(&self) -> Option<u32> {
        self.combo
    }

    pub const fn misses(&self) -> Option<u32> {
        self.misses
    }

    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    /// The mods that are forwarded to the engine.
    pub fn effective_mods(&self) -> u32 {
        self.mods.engine_bits()
    }

    /// Engine parameters shared by every evaluation of this request.
    ///
    /// Accuracy is left unset; see [`CalculationRequest::evaluation_params`].
    pub fn base_params(&self) -> EvaluationParams {
        let mut params = EvaluationParams::new(self.effective_mods());

        // A zero combo is a real value, only a missing one means full combo
        if let Some(combo) = self.combo {
            params = params.combo(combo);
        }

        if let Some(misses) = self.misses.filter(|&misses| misses > 0) {
            params = params.misses(misses);
        }

        params
    }

    /// Engine parameters for a single evaluation.
    ///
    /// Accuracy is only forwarded if it is positive, otherwise the engine
    /// assumes its own default.
    pub fn evaluation_params(&self) -> EvaluationParams {
        let params = self.base_params();

        match self.accuracy.filter(|&acc| acc > 0.0) {
            Some(acc) => params.accuracy(acc / 100.0),
            None => params,
        }
    }
}
