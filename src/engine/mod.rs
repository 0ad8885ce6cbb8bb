use std::{io, path::Path};

use thiserror::Error;

use crate::model::mode::GameMode;

pub use self::rosu::RosuEngine;

mod rosu;

/// A difficulty and performance engine.
///
/// Implementors turn a beatmap file into something that can be evaluated
/// for any set of score parameters. The engine is shared between all
/// calculators so it must not hold per-calculation state.
pub trait PerformanceEngine: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Decode the beatmap file at the given path.
    fn load_beatmap(&self, path: &Path) -> Result<Box<dyn EngineBeatmap>, EngineError>;
}

/// A beatmap that was decoded by a [`PerformanceEngine`].
pub trait EngineBeatmap {
    /// Convert the beatmap to the given mode.
    ///
    /// Converting to the mode the map already has is a no-op.
    fn convert(&mut self, mode: GameMode) -> Result<(), EngineError>;

    /// Calculate pp and stars for the given parameters.
    fn evaluate(&self, params: &EvaluationParams) -> Result<Evaluation, EngineError>;
}

/// Score parameters for a single engine evaluation.
///
/// Unset values are left to the engine's defaults, i.e. full combo, no
/// misses, and 100% accuracy.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[must_use]
pub struct EvaluationParams {
    pub mods: u32,
    pub combo: Option<u32>,
    pub misses: Option<u32>,
    /// Accuracy as a fraction between `0.0` and `1.0`.
    pub accuracy: Option<f64>,
}

impl EvaluationParams {
    /// Create new parameters with the given mods and defaults otherwise.
    pub const fn new(mods: u32) -> Self {
        Self {
            mods,
            combo: None,
            misses: None,
            accuracy: None,
        }
    }

    /// Specify the max combo of the play.
    pub const fn combo(mut self, combo: u32) -> Self {
        self.combo = Some(combo);

        self
    }

    /// Specify the amount of misses of the play.
    pub const fn misses(mut self, misses: u32) -> Self {
        self.misses = Some(misses);

        self
    }

    /// Specify the accuracy of the play as a fraction between `0.0` and
    /// `1.0`.
    pub const fn accuracy(mut self, accuracy: f64) -> Self {
        self.accuracy = Some(accuracy);

        self
    }
}

/// The result of an engine evaluation.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Evaluation {
    pub pp: f64,
    pub stars: f64,
}

/// Errors raised by a [`PerformanceEngine`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to decode beatmap: {0}")]
    Decode(#[source] io::Error),
    #[error("cannot convert beatmap to {mode}: {reason}")]
    Convert { mode: GameMode, reason: String },
    #[error("engine failure: {0}")]
    Other(String),
}
