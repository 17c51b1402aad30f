//! Day-by-day SEIR simulation runner.

use std::ops::ControlFlow;

use ds_model::{DayRecord, ParameterSet, TimeSeries};
use tracing::{debug, info};

use crate::error::{SimError, SimResult};
use crate::seir::SeirModel;
use crate::sim::{IntegratorType, SimOptions, SimProgress, SimStats, run_sim_with_progress};

/// Numerical options for an SEIR run. Output is always one record per day.
#[derive(Clone, Debug)]
pub struct SeirOptions {
    pub integrator: IntegratorType,
    /// Integrator substeps per day before any cut-back
    pub substeps: usize,
    /// Maximum number of substep halvings per day
    pub max_cutbacks: usize,
}

impl Default for SeirOptions {
    fn default() -> Self {
        Self {
            integrator: IntegratorType::RK4,
            substeps: 1,
            max_cutbacks: 6,
        }
    }
}

impl SeirOptions {
    fn sim_options(&self, duration_days: u32) -> SimOptions {
        SimOptions {
            dt: 1.0,
            steps: duration_days as usize,
            integrator: self.integrator,
            substeps: self.substeps,
            max_cutbacks: self.max_cutbacks,
        }
    }
}

/// Output of a completed SEIR run.
#[derive(Clone, Debug)]
pub struct SeirRun {
    pub series: TimeSeries,
    pub stats: SimStats,
}

/// Simulate days `0..=duration_days` for a validated parameter set.
pub fn simulate(params: &ParameterSet, opts: &SeirOptions) -> SimResult<TimeSeries> {
    simulate_with_progress(params, opts, None).map(|run| run.series)
}

/// Simulate with a per-day progress callback that may cancel the run.
///
/// Record `n` holds the state at the start of day `n` and beta(n).
pub fn simulate_with_progress(
    params: &ParameterSet,
    opts: &SeirOptions,
    progress: Option<&mut dyn FnMut(&SimProgress) -> ControlFlow<()>>,
) -> SimResult<SeirRun> {
    let model = SeirModel::new(params);
    let sim_opts = opts.sim_options(params.duration_days());
    debug!(
        population = params.population(),
        duration_days = params.duration_days(),
        beta0 = params.beta0(),
        seasonal_strength = params.seasonal_strength(),
        integrator = ?opts.integrator,
        "starting SEIR run"
    );

    let record = run_sim_with_progress(&model, &sim_opts, progress)?;

    let forcing = model.forcing();
    let mut records = Vec::with_capacity(record.x.len());
    for (day, state) in record.x.iter().enumerate() {
        if !state.is_finite() {
            return Err(SimError::NonPhysical {
                what: "non-finite compartment value",
                t: day as f64,
            });
        }
        records.push(DayRecord::new(day, state, forcing.beta_at(day as f64)));
    }

    info!(
        days = records.len(),
        cutbacks = record.stats.cutbacks,
        repairs = record.stats.repairs,
        "SEIR run complete"
    );

    Ok(SeirRun {
        series: TimeSeries::new(model.population(), params.sigma(), records),
        stats: record.stats,
    })
}
