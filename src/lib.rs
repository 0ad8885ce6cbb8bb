//! pp and star rating calculation for an [osu!] score server.
//!
//! ## Description
//!
//! Every submitted score and every "what-if" query of a chat bot ends up in a
//! [`PerformanceCalculator`]. It figures out the mode, makes sure the
//! beatmap's `.osu` file is on disk, hands everything to a difficulty and
//! performance engine, and zeroes out results that are clearly broken.
//!
//! The actual difficulty and performance calculation is done by
//! [`rosu-pp`] through [`RosuEngine`], though any [`PerformanceEngine`] can
//! be plugged in per mode.
//!
//! ## Usage
//!
//! ```no_run
//! use lets_pp::{
//!     BeatmapInfo, CalcContext, GameMode, PerformanceCalculator, PpConfig, ScoreInfo,
//! };
//!
//! // Resolve the configuration once at startup
//! let config = PpConfig::from_env().unwrap();
//! let ctx = CalcContext::from_config(&config);
//!
//! let map = BeatmapInfo::new(2785319).stars_std(6.5);
//!
//! let score = ScoreInfo {
//!     accuracy: 0.9834,
//!     mods: 8 + 64, // HDDT
//!     max_combo: 789,
//!     misses: 2,
//!     mode: GameMode::Osu,
//! };
//!
//! let calc = PerformanceCalculator::from_score(&ctx, &map, &score);
//!
//! // Failures are logged and result in 0pp and 0 stars
//! let pp = calc.pp().single().unwrap();
//! let stars = calc.stars();
//!
//! println!("Stars: {stars} | PP: {pp}");
//! ```
//!
//! ## Tillerino mode
//!
//! Instead of a single value, [`PerformanceCalculator::tillerino`] calculates
//! pp for 100%, 99%, 98%, and 95% accuracy. If any of these results is
//! broken, all four values are `0`.
//!
//! ## Features
//!
//! | Flag | Description | Dependencies
//! | - | - | -
//! | `default` | No features |
//! | `async_tokio` | Adds `PerformanceCalculator::spawn` to calculate on tokio's blocking thread pool. | [`tokio`]
//!
//! [osu!]: https://osu.ppy.sh/home
//! [`rosu-pp`]: https://github.com/MaxOhn/rosu-pp
//! [`tokio`]: https://docs.rs/tokio

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::float_cmp
)]

#[doc(inline)]
pub use self::{
    cache::{BeatmapCache, BeatmapSource, CacheError, FileBeatmapCache, NoSource},
    calculator::{
        BrokenResult, CalcError, Computation, PerformanceCalculator, PpValue,
        TILLERINO_ACCURACIES,
    },
    config::{ConfigError, EngineKind, PpConfig},
    engine::{
        EngineBeatmap, EngineError, Evaluation, EvaluationParams, PerformanceEngine, RosuEngine,
    },
    model::{beatmap::BeatmapInfo, mode::GameMode, score::ScoreInfo},
    registry::{CalcContext, EngineRegistry},
    request::{CalculationRequest, Origin},
};

/// Beatmap file preparation.
pub mod cache;

/// The pp calculator and its result types.
pub mod calculator;

/// Configuration resolved at startup.
pub mod config;

/// The difficulty and performance engine interface.
pub mod engine;

/// Types used in and around this crate.
pub mod model;

/// Engines per mode and the shared calculation context.
pub mod registry;

/// Normalization of calculation inputs.
pub mod request;
