use std::path::Path;

use rosu_pp::{model::mods::GameMods, Beatmap, Performance};

use crate::model::mode::GameMode;

use super::{EngineBeatmap, EngineError, Evaluation, EvaluationParams, PerformanceEngine};

/// [`PerformanceEngine`] backed by [`rosu-pp`].
///
/// [`rosu-pp`]: https://github.com/MaxOhn/rosu-pp
#[derive(Copy, Clone, Debug, Default)]
pub struct RosuEngine;

impl PerformanceEngine for RosuEngine {
    fn name(&self) -> &'static str {
        "rosu-pp"
    }

    fn load_beatmap(&self, path: &Path) -> Result<Box<dyn EngineBeatmap>, EngineError> {
        let map = Beatmap::from_path(path).map_err(EngineError::Decode)?;

        Ok(Box::new(RosuBeatmap { map }))
    }
}

struct RosuBeatmap {
    map: Beatmap,
}

impl EngineBeatmap for RosuBeatmap {
    fn convert(&mut self, mode: GameMode) -> Result<(), EngineError> {
        // Key mods are applied during evaluation, not during conversion
        let mods = GameMods::from(0_u32);

        self.map
            .convert_mut(mode.into(), &mods)
            .map_err(|err| EngineError::Convert {
                mode,
                reason: err.to_string(),
            })
    }

    fn evaluate(&self, params: &EvaluationParams) -> Result<Evaluation, EngineError> {
        let mut calc = Performance::new(&self.map).mods(params.mods);

        if let Some(combo) = params.combo {
            calc = calc.combo(combo);
        }

        if let Some(misses) = params.misses {
            calc = calc.misses(misses);
        }

        // rosu-pp expects a percentage
        if let Some(accuracy) = params.accuracy {
            calc = calc.accuracy(accuracy * 100.0);
        }

        let attrs = calc.calculate();

        let evaluation = Evaluation {
            pp: attrs.pp(),
            stars: attrs.stars(),
        };

        if evaluation.pp.is_finite() && evaluation.stars.is_finite() {
            Ok(evaluation)
        } else {
            Err(EngineError::Other(format!(
                "non-finite result (pp={}, stars={})",
                evaluation.pp, evaluation.stars
            )))
        }
    }
}
