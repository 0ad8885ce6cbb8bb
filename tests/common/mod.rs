#![allow(unused)]

use std::{
    io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use lets_pp::{
    BeatmapCache, BeatmapInfo, CacheError, CalcContext, EngineBeatmap, EngineError,
    EngineRegistry, Evaluation, EvaluationParams, GameMode, PerformanceEngine,
};

pub use self::mods::*;

/// Bit values for mods
mod mods {
    pub const NM: u32 = 0;
    pub const NF: u32 = 1 << 0;
    pub const EZ: u32 = 1 << 1;
    pub const HD: u32 = 1 << 3;
    pub const HR: u32 = 1 << 4;
    pub const DT: u32 = 1 << 6;
    pub const HT: u32 = 1 << 8;
    pub const FL: u32 = 1 << 10;
    pub const KEY4: u32 = 1 << 15;
    pub const V2: u32 = 1 << 29;
}

/// Content of a small osu!standard map
pub const JUMPS_MAP: &str = include_str!("../resources/jumps.osu");

#[track_caller]
pub fn assert_eq_float(a: f64, b: f64) {
    assert!((a - b).abs() < f64::EPSILON, "{a} != {b}")
}

type Script = dyn Fn(&EvaluationParams) -> Result<Evaluation, EngineError> + Send + Sync;

/// Everything the [`ScriptedEngine`] was asked to do.
#[derive(Default)]
pub struct Calls {
    pub loaded: Vec<PathBuf>,
    pub converted: Vec<GameMode>,
    pub evaluated: Vec<EvaluationParams>,
}

/// Engine whose evaluations are decided by a closure.
#[derive(Clone)]
pub struct ScriptedEngine {
    script: Arc<Script>,
    calls: Arc<Mutex<Calls>>,
}

impl ScriptedEngine {
    pub fn new<F>(script: F) -> Self
    where
        F: Fn(&EvaluationParams) -> Result<Evaluation, EngineError> + Send + Sync + 'static,
    {
        Self {
            script: Arc::new(script),
            calls: Arc::default(),
        }
    }

    /// Always returns the same result.
    pub fn fixed(pp: f64, stars: f64) -> Self {
        Self::new(move |_| Ok(Evaluation { pp, stars }))
    }

    /// pp scale with accuracy, stars are constant.
    pub fn linear(max_pp: f64, stars: f64) -> Self {
        Self::new(move |params| {
            let acc = params.accuracy.unwrap_or(1.0);

            Ok(Evaluation {
                pp: max_pp * acc,
                stars,
            })
        })
    }

    pub fn evaluated(&self) -> Vec<EvaluationParams> {
        self.calls.lock().unwrap().evaluated.clone()
    }

    pub fn converted(&self) -> Vec<GameMode> {
        self.calls.lock().unwrap().converted.clone()
    }

    pub fn loaded(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().loaded.clone()
    }

    /// A context using this engine for all modes.
    pub fn context(&self) -> CalcContext {
        CalcContext::new(
            Arc::new(StubCache::default()),
            EngineRegistry::uniform(Arc::new(self.clone())),
        )
    }
}

impl PerformanceEngine for ScriptedEngine {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn load_beatmap(&self, path: &Path) -> Result<Box<dyn EngineBeatmap>, EngineError> {
        self.calls.lock().unwrap().loaded.push(path.to_owned());

        Ok(Box::new(self.clone()))
    }
}

impl EngineBeatmap for ScriptedEngine {
    fn convert(&mut self, mode: GameMode) -> Result<(), EngineError> {
        self.calls.lock().unwrap().converted.push(mode);

        Ok(())
    }

    fn evaluate(&self, params: &EvaluationParams) -> Result<Evaluation, EngineError> {
        self.calls.lock().unwrap().evaluated.push(*params);

        (self.script)(params)
    }
}

/// Cache that doesn't touch the disk.
#[derive(Default)]
pub struct StubCache {
    pub fail: bool,
}

impl BeatmapCache for StubCache {
    fn path(&self, beatmap_id: u32) -> PathBuf {
        PathBuf::from(format!("/stub/{beatmap_id}.osu"))
    }

    fn ensure_cached(&self, path: &Path, _: &BeatmapInfo) -> Result<(), CacheError> {
        if self.fail {
            Err(CacheError::Io {
                path: path.to_owned(),
                source: io::Error::new(io::ErrorKind::Other, "disk on fire"),
            })
        } else {
            Ok(())
        }
    }
}
