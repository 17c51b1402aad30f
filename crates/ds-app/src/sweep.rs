//! Parallel sweeps over the seasonal strength.

use ds_project::ScenarioDef;
use ds_results::{Summary, summarize};
use ds_sim::{SeirOptions, simulate};
use rayon::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::error::AppResult;

#[derive(Debug, Clone, Serialize)]
pub struct SweepPoint {
    pub seasonal_strength: f64,
    pub summary: Summary,
}

/// Run the scenario once per strength, holding every other parameter fixed.
///
/// Points come back in the order of `strengths`. The first invalid strength
/// or failed run aborts the sweep.
pub fn sweep_seasonal_strength(
    scenario: &ScenarioDef,
    strengths: &[f64],
    options: &SeirOptions,
) -> AppResult<Vec<SweepPoint>> {
    let base = ds_project::validate_scenario(scenario)?;
    let calendar = scenario.calendar();
    debug!(points = strengths.len(), "starting seasonal strength sweep");

    strengths
        .par_iter()
        .map(|&seasonal_strength| -> AppResult<SweepPoint> {
            let params = base.with_seasonal_strength(seasonal_strength)?;
            let series = simulate(&params, options)?;
            let summary = summarize(&series, &calendar)?;
            Ok(SweepPoint {
                seasonal_strength,
                summary,
            })
        })
        .collect()
}
