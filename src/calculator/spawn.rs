use crate::{
    model::{beatmap::BeatmapInfo, score::ScoreInfo},
    registry::CalcContext,
    request::CalculationRequest,
};

use super::{CalcError, PerformanceCalculator};

impl PerformanceCalculator {
    /// Same as [`PerformanceCalculator::new`] but runs on tokio's blocking
    /// thread pool so that async servers don't stall while beatmaps are
    /// prepared and calculated.
    pub async fn spawn(
        ctx: CalcContext,
        beatmap: BeatmapInfo,
        score: Option<ScoreInfo>,
        accuracy: Option<f64>,
        mods: u32,
        tillerino: bool,
    ) -> Self {
        let request = match score {
            Some(ref score) => CalculationRequest::from_score(score),
            None => CalculationRequest::manual(&beatmap, accuracy, mods),
        };

        let task_ctx = ctx.clone();
        let task_map = beatmap.clone();

        let task = tokio::task::spawn_blocking(move || {
            Self::new(
                &task_ctx,
                &task_map,
                score.as_ref(),
                accuracy,
                mods,
                tillerino,
            )
        });

        match task.await {
            Ok(calc) => calc,
            Err(err) => {
                let err = CalcError::Task(err.to_string());

                Self::failed(ctx, beatmap, request, tillerino, err)
            }
        }
    }
}
