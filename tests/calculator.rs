use std::sync::Arc;

use lets_pp::{
    BeatmapInfo, BrokenResult, CalcContext, CalcError, EngineError, EngineRegistry,
    Evaluation, EvaluationParams, GameMode, Origin, PerformanceCalculator, PpValue, ScoreInfo,
};

use self::common::*;

mod common;

fn std_map() -> BeatmapInfo {
    BeatmapInfo::new(2785319).stars_std(6.2)
}

fn score(mode: GameMode) -> ScoreInfo {
    ScoreInfo {
        accuracy: 0.9734,
        mods: HD | DT,
        max_combo: 412,
        misses: 2,
        mode,
    }
}

#[test]
fn score_single_calculation() {
    let engine = ScriptedEngine::fixed(312.5, 6.4);
    let ctx = engine.context();
    let score = score(GameMode::Osu);

    let calc = PerformanceCalculator::from_score(&ctx, &std_map(), &score);

    assert_eq!(calc.pp(), &PpValue::Single(312.5));
    assert_eq_float(calc.stars(), 6.4);
    assert_eq!(calc.mode(), GameMode::Osu);
    assert_eq!(calc.request().origin(), Origin::Score);
    assert!(calc.failure().is_none());
    assert!(calc.broken().is_none());

    let expected = EvaluationParams::new(HD | DT)
        .combo(412)
        .misses(2)
        .accuracy(score.accuracy * 100.0 / 100.0);

    assert_eq!(engine.evaluated(), vec![expected]);
    assert_eq!(engine.converted(), vec![GameMode::Osu]);
    assert_eq!(engine.loaded().len(), 1);
    assert!(engine.loaded()[0].ends_with("2785319.osu"));
}

#[test]
fn score_accuracy_is_scaled() {
    let ctx = ScriptedEngine::fixed(1.0, 1.0).context();
    let score = score(GameMode::Osu);

    let calc = PerformanceCalculator::from_score(&ctx, &std_map(), &score);

    assert_eq!(calc.request().accuracy(), Some(score.accuracy * 100.0));
}

#[test]
fn score_mode_overrides_beatmap() {
    let engine = ScriptedEngine::fixed(100.0, 3.0);
    let ctx = engine.context();

    let calc = PerformanceCalculator::from_score(&ctx, &std_map(), &score(GameMode::Mania));

    assert_eq!(calc.mode(), GameMode::Mania);
    assert_eq!(engine.converted(), vec![GameMode::Mania]);
}

#[test]
fn zero_combo_and_misses() {
    let engine = ScriptedEngine::fixed(5.0, 4.0);
    let ctx = engine.context();

    let score = ScoreInfo {
        max_combo: 0,
        misses: 0,
        ..score(GameMode::Osu)
    };

    let _ = PerformanceCalculator::from_score(&ctx, &std_map(), &score);

    let params = engine.evaluated()[0];
    assert_eq!(params.combo, Some(0));
    assert_eq!(params.misses, None);
}

#[test]
fn manual_without_accuracy() {
    let engine = ScriptedEngine::fixed(250.0, 5.5);
    let ctx = engine.context();

    let calc = PerformanceCalculator::manual(&ctx, &std_map(), None, NM);

    assert_eq!(calc.pp().single(), Some(250.0));
    assert_eq!(calc.request().origin(), Origin::Manual);
    assert_eq!(engine.evaluated(), vec![EvaluationParams::new(NM)]);
}

#[test]
fn manual_zero_accuracy_is_unset() {
    let engine = ScriptedEngine::fixed(250.0, 5.5);
    let ctx = engine.context();

    let _ = PerformanceCalculator::manual(&ctx, &std_map(), Some(0.0), HR);

    assert_eq!(engine.evaluated(), vec![EvaluationParams::new(HR)]);
}

#[test]
fn unknown_mod_bits_are_stripped() {
    let engine = ScriptedEngine::fixed(250.0, 5.5);
    let ctx = engine.context();

    let calc = PerformanceCalculator::manual(&ctx, &std_map(), Some(99.0), HD | KEY4 | V2);

    assert_eq!(calc.request().mods(), HD | KEY4 | V2);
    assert_eq!(engine.evaluated()[0].mods, HD);
}

#[test]
fn manual_mode_inference_order() {
    let cases = [
        (BeatmapInfo::new(1).stars_std(1.0).stars_mania(9.0), GameMode::Osu),
        (BeatmapInfo::new(1).stars_taiko(1.0).stars_ctb(9.0), GameMode::Taiko),
        (BeatmapInfo::new(1).stars_ctb(1.0).stars_mania(9.0), GameMode::Catch),
        (BeatmapInfo::new(1).stars_mania(1.0), GameMode::Mania),
        (BeatmapInfo::new(1), GameMode::Osu),
    ];

    for (map, mode) in cases {
        let engine = ScriptedEngine::fixed(10.0, 1.0);
        let calc = PerformanceCalculator::manual(&engine.context(), &map, None, NM);

        assert_eq!(calc.mode(), mode);
        assert_eq!(engine.converted(), vec![mode]);
    }
}

#[test]
fn single_broken_stars() {
    let ctx = ScriptedEngine::fixed(9999.0, 25.0).context();

    let calc = PerformanceCalculator::manual(&ctx, &std_map(), Some(100.0), NM);

    assert_eq!(calc.pp(), &PpValue::Single(0.0));
    assert_eq_float(calc.stars(), 25.0);
    assert_eq!(calc.broken(), Some(BrokenResult::ImplausibleStars));
    assert!(calc.failure().is_none());
}

#[test]
fn taiko_convert_sanitization() {
    let score = score(GameMode::Taiko);

    let ctx = ScriptedEngine::fixed(900.0, 7.0).context();
    let calc = PerformanceCalculator::from_score(&ctx, &std_map(), &score);

    assert_eq!(calc.pp(), &PpValue::Single(0.0));
    assert_eq!(calc.broken(), Some(BrokenResult::TaikoConvert));

    let taiko_map = BeatmapInfo::new(2785319).stars_taiko(7.0);
    let calc = PerformanceCalculator::from_score(&ctx, &taiko_map, &score);

    assert_eq!(calc.pp(), &PpValue::Single(900.0));
    assert_eq!(calc.broken(), None);
}

#[test]
fn tillerino_checkpoints() {
    let engine = ScriptedEngine::linear(400.0, 6.0);
    let ctx = engine.context();

    let calc = PerformanceCalculator::tillerino(&ctx, &std_map(), None, HD | V2);

    let pp = calc.pp().tillerino().unwrap();
    assert_eq_float(pp[0], 400.0);
    assert_eq_float(pp[1], 400.0 * 0.99);
    assert_eq_float(pp[2], 400.0 * 0.98);
    assert_eq_float(pp[3], 400.0 * 0.95);
    assert_eq_float(calc.stars(), 6.0);

    let evaluated = engine.evaluated();
    let accuracies: Vec<_> = evaluated.iter().map(|params| params.accuracy).collect();

    assert_eq!(
        accuracies,
        vec![Some(1.0), Some(0.99), Some(0.98), Some(0.95), None]
    );
    assert!(evaluated.iter().all(|params| params.mods == HD));
}

#[test]
fn tillerino_mania_only_map() {
    let engine = ScriptedEngine::linear(300.0, 4.2);
    let ctx = engine.context();
    let map = BeatmapInfo::new(1638954).stars_mania(4.2);

    let calc = PerformanceCalculator::tillerino(&ctx, &map, None, NM);

    assert_eq!(calc.mode(), GameMode::Mania);
    assert!(calc.pp().tillerino().unwrap().iter().all(|pp| *pp > 0.0));
    assert_eq!(engine.converted(), vec![GameMode::Mania]);
}

#[test]
fn tillerino_broken_checkpoint_zeroes_all() {
    let engine = ScriptedEngine::new(|params| {
        let stars = if params.accuracy == Some(0.99) { 21.0 } else { 6.0 };

        Ok(Evaluation { pp: 300.0, stars })
    });

    let ctx = engine.context();
    let calc = PerformanceCalculator::tillerino(&ctx, &std_map(), None, NM);

    assert_eq!(calc.pp(), &PpValue::Tillerino([0.0; 4]));
    assert_eq_float(calc.stars(), 0.0);
    assert_eq!(calc.broken(), Some(BrokenResult::ImplausibleStars));

    // Remaining checkpoints and the star lookup are skipped
    assert_eq!(engine.evaluated().len(), 2);
}

#[test]
fn tillerino_taiko_convert_zeroes_all() {
    let engine = ScriptedEngine::linear(850.0, 6.0);
    let ctx = engine.context();
    let score = score(GameMode::Taiko);

    let calc = PerformanceCalculator::new(&ctx, &std_map(), Some(&score), None, NM, true);

    assert_eq!(calc.pp(), &PpValue::Tillerino([0.0; 4]));
    assert_eq!(calc.broken(), Some(BrokenResult::TaikoConvert));
    assert_eq!(engine.evaluated().len(), 1);
}

#[test]
fn tillerino_uses_score_combo_and_misses() {
    let engine = ScriptedEngine::linear(200.0, 5.0);
    let ctx = engine.context();
    let score = score(GameMode::Osu);

    let calc = PerformanceCalculator::new(&ctx, &std_map(), Some(&score), None, NM, true);

    let evaluated = engine.evaluated();
    assert!(calc.pp().tillerino().is_some());

    for params in &evaluated[..4] {
        assert_eq!(params.combo, Some(412));
        assert_eq!(params.misses, Some(2));
        assert_eq!(params.mods, HD | DT);
    }

    // Star lookup only uses the mods
    assert_eq!(evaluated[4], EvaluationParams::new(HD | DT));
}

#[test]
fn tillerino_without_pp_skips_stars() {
    let engine = ScriptedEngine::fixed(0.0, 3.0);
    let ctx = engine.context();

    let calc = PerformanceCalculator::tillerino(&ctx, &std_map(), None, NM);

    assert_eq!(calc.pp(), &PpValue::Tillerino([0.0; 4]));
    assert_eq_float(calc.stars(), 0.0);
    assert_eq!(calc.broken(), None);
    assert_eq!(engine.evaluated().len(), 4);
}

#[test]
fn cache_failure() {
    let engine = ScriptedEngine::fixed(100.0, 5.0);
    let ctx = CalcContext::new(
        Arc::new(StubCache { fail: true }),
        EngineRegistry::uniform(Arc::new(engine.clone())),
    );

    let calc = PerformanceCalculator::from_score(&ctx, &std_map(), &score(GameMode::Osu));

    assert_eq!(calc.pp(), &PpValue::Single(0.0));
    assert_eq_float(calc.stars(), 0.0);
    assert!(matches!(calc.failure(), Some(CalcError::Cache(_))));
    assert!(engine.loaded().is_empty());

    let calc = PerformanceCalculator::tillerino(&ctx, &std_map(), None, NM);
    assert_eq!(calc.pp(), &PpValue::Tillerino([0.0; 4]));
}

#[test]
fn unsupported_mode() {
    let engine = ScriptedEngine::fixed(100.0, 5.0);
    let registry = EngineRegistry::new().with_engine(GameMode::Osu, Arc::new(engine.clone()));
    let ctx = CalcContext::new(Arc::new(StubCache::default()), registry);

    let calc = PerformanceCalculator::from_score(&ctx, &std_map(), &score(GameMode::Catch));

    assert_eq!(calc.pp(), &PpValue::Single(0.0));
    assert_eq_float(calc.stars(), 0.0);
    assert!(matches!(
        calc.failure(),
        Some(CalcError::UnsupportedMode(GameMode::Catch))
    ));
    assert!(engine.evaluated().is_empty());
}

#[test]
fn engine_failure() {
    let engine = ScriptedEngine::new(|_| Err(EngineError::Other("boom".to_owned())));
    let ctx = engine.context();

    let calc = PerformanceCalculator::manual(&ctx, &std_map(), Some(98.0), NM);

    assert_eq!(calc.pp(), &PpValue::Single(0.0));
    assert_eq_float(calc.stars(), 0.0);
    assert!(matches!(calc.failure(), Some(CalcError::Engine(_))));

    let calc = PerformanceCalculator::tillerino(&ctx, &std_map(), None, NM);

    assert_eq!(calc.pp(), &PpValue::Tillerino([0.0; 4]));
    assert_eq_float(calc.stars(), 0.0);
}

#[test]
fn engine_failure_after_checkpoints() {
    let engine = ScriptedEngine::new(|params| match params.accuracy {
        Some(acc) => Ok(Evaluation {
            pp: 100.0 * acc,
            stars: 5.0,
        }),
        None => Err(EngineError::Other("no stars".to_owned())),
    });

    let ctx = engine.context();
    let calc = PerformanceCalculator::tillerino(&ctx, &std_map(), None, NM);

    assert_eq!(calc.pp(), &PpValue::Tillerino([0.0; 4]));
    assert_eq_float(calc.stars(), 0.0);
    assert!(calc.failure().is_some());
}

#[test]
fn identical_inputs_identical_results() {
    let ctx = ScriptedEngine::linear(321.0, 5.4).context();
    let score = score(GameMode::Osu);

    let a = PerformanceCalculator::from_score(&ctx, &std_map(), &score);
    let b = PerformanceCalculator::from_score(&ctx, &std_map(), &score);

    assert_eq!(a.pp(), b.pp());
    assert_eq_float(a.stars(), b.stars());

    let first = a.compute().unwrap();
    let second = a.compute().unwrap();

    assert_eq!(first, second);
    assert_eq!(&first.pp, a.pp());
}
