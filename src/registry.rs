use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use crate::{
    cache::{BeatmapCache, FileBeatmapCache},
    config::{EngineKind, PpConfig},
    engine::{PerformanceEngine, RosuEngine},
    model::mode::GameMode,
};

/// Maps each mode to the engine that calculates it.
///
/// Built once at startup and only read afterwards.
#[derive(Clone, Default)]
pub struct EngineRegistry {
    engines: [Option<Arc<dyn PerformanceEngine>>; 4],
}

const fn slot(mode: GameMode) -> usize {
    mode.id() as usize
}

impl EngineRegistry {
    /// Create a registry without any engines.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry that uses the same engine for all modes.
    pub fn uniform(engine: Arc<dyn PerformanceEngine>) -> Self {
        GameMode::ALL
            .into_iter()
            .fold(Self::new(), |registry, mode| {
                registry.with_engine(mode, Arc::clone(&engine))
            })
    }

    /// Create the registry as configured.
    pub fn from_config(config: &PpConfig) -> Self {
        let rosu: Arc<dyn PerformanceEngine> = Arc::new(RosuEngine);

        GameMode::ALL
            .into_iter()
            .fold(Self::new(), |registry, mode| match config.engines.get(mode) {
                EngineKind::Rosu => registry.with_engine(mode, Arc::clone(&rosu)),
                EngineKind::Disabled => registry,
            })
    }

    /// Use the given engine for a mode.
    #[must_use]
    pub fn with_engine(mut self, mode: GameMode, engine: Arc<dyn PerformanceEngine>) -> Self {
        self.engines[slot(mode)] = Some(engine);

        self
    }

    /// The engine for a mode, if any.
    pub fn engine_for(&self, mode: GameMode) -> Option<&Arc<dyn PerformanceEngine>> {
        self.engines[slot(mode)].as_ref()
    }
}

impl Debug for EngineRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut map = f.debug_map();

        for mode in GameMode::ALL {
            map.entry(&mode, &self.engine_for(mode).map(|engine| engine.name()));
        }

        map.finish()
    }
}

/// Everything a calculator needs besides its own inputs.
///
/// Cloning is cheap; all clones share the same cache and engines.
#[derive(Clone)]
pub struct CalcContext {
    cache: Arc<dyn BeatmapCache>,
    engines: EngineRegistry,
}

impl CalcContext {
    pub fn new(cache: Arc<dyn BeatmapCache>, engines: EngineRegistry) -> Self {
        Self { cache, engines }
    }

    /// Create a context with a [`FileBeatmapCache`] and engines as
    /// configured.
    pub fn from_config(config: &PpConfig) -> Self {
        let cache = FileBeatmapCache::new(config.beatmaps_folder.clone());

        Self::new(Arc::new(cache), EngineRegistry::from_config(config))
    }

    pub fn cache(&self) -> &dyn BeatmapCache {
        self.cache.as_ref()
    }

    pub const fn engines(&self) -> &EngineRegistry {
        &self.engines
    }
}

impl Debug for CalcContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CalcContext")
            .field("engines", &self.engines)
            .finish_non_exhaustive()
    }
}
