use thiserror::Error;

use crate::{
    cache::CacheError,
    engine::{EngineBeatmap, EngineError, Evaluation, EvaluationParams},
    model::{beatmap::BeatmapInfo, mode::GameMode, mods::Mods, score::ScoreInfo},
    registry::CalcContext,
    request::CalculationRequest,
};

pub use self::broken::{BrokenResult, MAX_PLAUSIBLE_STARS, TAIKO_CONVERT_MAX_PP};

mod broken;

#[cfg(feature = "async_tokio")]
mod spawn;

/// Accuracies for which pp are calculated in tillerino mode, in order.
pub const TILLERINO_ACCURACIES: [f64; 4] = [1.0, 0.99, 0.98, 0.95];

/// The pp of a calculation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PpValue {
    /// A single value for the given accuracy.
    Single(f64),
    /// One value per entry of [`TILLERINO_ACCURACIES`].
    Tillerino([f64; 4]),
}

impl PpValue {
    const fn zeroed(tillerino: bool) -> Self {
        if tillerino {
            Self::Tillerino([0.0; 4])
        } else {
            Self::Single(0.0)
        }
    }

    /// The single pp value, if not in tillerino mode.
    pub const fn single(&self) -> Option<f64> {
        match self {
            Self::Single(pp) => Some(*pp),
            Self::Tillerino(_) => None,
        }
    }

    /// The tillerino pp values, if in tillerino mode.
    pub const fn tillerino(&self) -> Option<[f64; 4]> {
        match self {
            Self::Single(_) => None,
            Self::Tillerino(pp) => Some(*pp),
        }
    }
}

/// The outcome of a successful calculation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Computation {
    pub pp: PpValue,
    pub stars: f64,
    /// Set if the pp were zeroed because the engine's result was
    /// implausible.
    pub broken: Option<BrokenResult>,
}

/// Reasons why a calculation failed.
#[derive(Debug, Error)]
pub enum CalcError {
    #[error("failed to prepare beatmap file: {0}")]
    Cache(#[from] CacheError),
    #[error("performance engine failed: {0}")]
    Engine(#[from] EngineError),
    #[error("no performance engine for mode {0}")]
    UnsupportedMode(GameMode),
    #[error("calculation task failed: {0}")]
    Task(String),
}

/// Calculates pp and stars for a score or for manually given parameters.
///
/// The calculation happens immediately on construction and never fails
/// loudly: if anything goes wrong the pp and stars are simply `0`. The
/// cause can still be inspected through [`PerformanceCalculator::failure`].
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
///
/// use lets_pp::{
///     BeatmapInfo, CalcContext, EngineRegistry, FileBeatmapCache, PerformanceCalculator,
///     RosuEngine,
/// };
///
/// let ctx = CalcContext::new(
///     Arc::new(FileBeatmapCache::new("/data/.data/beatmaps")),
///     EngineRegistry::uniform(Arc::new(RosuEngine)),
/// );
///
/// let map = BeatmapInfo::new(2785319).stars_std(6.5);
///
/// // HDHR at 99.2% with full combo
/// let calc = PerformanceCalculator::manual(&ctx, &map, Some(99.2), 8 + 16);
/// println!("{:?}pp ({}*)", calc.pp(), calc.stars());
///
/// // What-if values for 100%, 99%, 98%, and 95%
/// let calc = PerformanceCalculator::tillerino(&ctx, &map, None, 0);
/// let [pp_100, pp_99, pp_98, pp_95] = calc.pp().tillerino().unwrap();
/// ```
#[derive(Debug)]
pub struct PerformanceCalculator {
    ctx: CalcContext,
    beatmap: BeatmapInfo,
    request: CalculationRequest,
    tillerino: bool,
    pp: PpValue,
    stars: f64,
    broken: Option<BrokenResult>,
    failure: Option<CalcError>,
}

impl PerformanceCalculator {
    /// Create a calculator and run the calculation.
    ///
    /// If a score is given, its accuracy, mods, combo, misses, and mode are
    /// used and `accuracy` and `mods` are ignored. Otherwise, `accuracy`
    /// (`0.0..=100.0`) and `mods` are used with a full combo and the mode is
    /// inferred from the beatmap's stored star ratings.
    ///
    /// If `tillerino` is set, the pp are calculated for each of
    /// [`TILLERINO_ACCURACIES`] instead of the request's accuracy.
    pub fn new(
        ctx: &CalcContext,
        beatmap: &BeatmapInfo,
        score: Option<&ScoreInfo>,
        accuracy: Option<f64>,
        mods: u32,
        tillerino: bool,
    ) -> Self {
        let request = match score {
            Some(score) => CalculationRequest::from_score(score),
            None => CalculationRequest::manual(beatmap, accuracy, mods),
        };

        let mut calc = Self {
            ctx: ctx.clone(),
            beatmap: beatmap.clone(),
            request,
            tillerino,
            pp: PpValue::zeroed(tillerino),
            stars: 0.0,
            broken: None,
            failure: None,
        };

        tracing::debug!(
            beatmap_id = beatmap.beatmap_id,
            mode = %request.mode(),
            origin = ?request.origin(),
            tillerino,
            "Initialized pp calculation"
        );

        let res = calc.compute();
        calc.apply(res);

        calc
    }

    /// Calculate pp and stars of a submitted score.
    pub fn from_score(ctx: &CalcContext, beatmap: &BeatmapInfo, score: &ScoreInfo) -> Self {
        Self::new(ctx, beatmap, Some(score), None, 0, false)
    }

    /// Calculate pp and stars for the given accuracy and mods.
    pub fn manual(
        ctx: &CalcContext,
        beatmap: &BeatmapInfo,
        accuracy: Option<f64>,
        mods: u32,
    ) -> Self {
        Self::new(ctx, beatmap, None, accuracy, mods, false)
    }

    /// Calculate the pp for each of [`TILLERINO_ACCURACIES`].
    pub fn tillerino(
        ctx: &CalcContext,
        beatmap: &BeatmapInfo,
        accuracy: Option<f64>,
        mods: u32,
    ) -> Self {
        Self::new(ctx, beatmap, None, accuracy, mods, true)
    }

    /// Failed calculator without running anything.
    #[cfg_attr(not(feature = "async_tokio"), allow(dead_code))]
    pub(crate) fn failed(
        ctx: CalcContext,
        beatmap: BeatmapInfo,
        request: CalculationRequest,
        tillerino: bool,
        err: CalcError,
    ) -> Self {
        let mut calc = Self {
            ctx,
            beatmap,
            request,
            tillerino,
            pp: PpValue::zeroed(tillerino),
            stars: 0.0,
            broken: None,
            failure: None,
        };

        calc.apply(Err(err));

        calc
    }

    /// Run the calculation again without touching the stored result.
    ///
    /// Given the same beatmap file and engines, this yields the same
    /// [`Computation`] every time.
    pub fn compute(&self) -> Result<Computation, CalcError> {
        let mode = self.request.mode();
        let cache = self.ctx.cache();

        let path = cache.path(self.beatmap.beatmap_id);
        tracing::debug!(beatmap_id = self.beatmap.beatmap_id, path = %path.display(), "Map file");
        cache.ensure_cached(&path, &self.beatmap)?;

        let engine = self
            .ctx
            .engines()
            .engine_for(mode)
            .ok_or(CalcError::UnsupportedMode(mode))?;

        let mut map = engine.load_beatmap(&path)?;
        map.convert(mode)?;

        let unsupported = self.request.mods().unsupported_bits();

        if unsupported != 0 {
            tracing::trace!(unsupported, "Stripped mods unknown to the engine");
        }

        let computation = if self.tillerino {
            self.compute_tillerino(map.as_ref())?
        } else {
            self.compute_single(map.as_ref())?
        };

        tracing::debug!(
            beatmap_id = self.beatmap.beatmap_id,
            engine = engine.name(),
            pp = ?computation.pp,
            stars = computation.stars,
            "Calculated pp"
        );

        Ok(computation)
    }

    fn compute_single(&self, map: &dyn EngineBeatmap) -> Result<Computation, CalcError> {
        let eval = map.evaluate(&self.request.evaluation_params())?;
        let broken = self.check_broken(&eval);

        let pp = if broken.is_some() { 0.0 } else { eval.pp };

        Ok(Computation {
            pp: PpValue::Single(pp),
            stars: eval.stars,
            broken,
        })
    }

    fn compute_tillerino(&self, map: &dyn EngineBeatmap) -> Result<Computation, CalcError> {
        let params = self.request.base_params();
        let mut pp = [0.0; 4];

        for (slot, acc) in pp.iter_mut().zip(TILLERINO_ACCURACIES) {
            let eval = map.evaluate(&params.accuracy(acc))?;

            if let Some(broken) = self.check_broken(&eval) {
                return Ok(Computation {
                    pp: PpValue::Tillerino([0.0; 4]),
                    stars: 0.0,
                    broken: Some(broken),
                });
            }

            *slot = eval.pp;
        }

        // Stars only depend on the mods
        let stars = if pp[0] > 0.0 {
            map.evaluate(&EvaluationParams::new(params.mods))?.stars
        } else {
            0.0
        };

        Ok(Computation {
            pp: PpValue::Tillerino(pp),
            stars,
            broken: None,
        })
    }

    fn check_broken(&self, eval: &Evaluation) -> Option<BrokenResult> {
        let broken = BrokenResult::detect(self.request.mode(), &self.beatmap, eval);

        if let Some(reason) = broken {
            tracing::warn!(
                beatmap_id = self.beatmap.beatmap_id,
                mode = %self.request.mode(),
                pp = eval.pp,
                stars = eval.stars,
                %reason,
                "Broken map, zeroing pp"
            );
        }

        broken
    }

    fn apply(&mut self, res: Result<Computation, CalcError>) {
        match res {
            Ok(computation) => {
                self.pp = computation.pp;
                self.stars = computation.stars;
                self.broken = computation.broken;
                self.failure = None;
            }
            Err(err) => {
                tracing::error!(
                    beatmap_id = self.beatmap.beatmap_id,
                    mode = %self.request.mode(),
                    error = %err,
                    "Failed to calculate pp"
                );

                self.pp = PpValue::zeroed(self.tillerino);
                self.stars = 0.0;
                self.broken = None;
                self.failure = Some(err);
            }
        }
    }

    /// The calculated pp.
    ///
    /// [`PpValue::Tillerino`] in tillerino mode, [`PpValue::Single`]
    /// otherwise, even if the calculation failed.
    pub const fn pp(&self) -> &PpValue {
        &self.pp
    }

    /// The calculated star rating.
    pub const fn stars(&self) -> f64 {
        self.stars
    }

    /// The mode that was calculated.
    pub const fn mode(&self) -> GameMode {
        self.request.mode()
    }

    pub const fn request(&self) -> &CalculationRequest {
        &self.request
    }

    pub const fn beatmap(&self) -> &BeatmapInfo {
        &self.beatmap
    }

    /// Why the pp were zeroed despite a successful calculation.
    pub const fn broken(&self) -> Option<BrokenResult> {
        self.broken
    }

    /// Why the calculation failed, if it did.
    pub const fn failure(&self) -> Option<&CalcError> {
        self.failure.as_ref()
    }
}
