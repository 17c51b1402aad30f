//! Scenario run service.

use std::ops::ControlFlow;
use std::time::Instant;

use ds_model::{ParameterSet, TimeSeries};
use ds_project::ScenarioDef;
use ds_results::{Summary, summarize};
use ds_sim::{SeirOptions, SimProgress, SimStats, simulate_with_progress};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::labels::{ChartTitles, chart_titles};
use crate::progress::{RunProgressEvent, RunStage};

/// Callback receiving run progress. Returning `Break` cancels the run.
pub type ProgressCallback<'a> = &'a mut dyn FnMut(RunProgressEvent) -> ControlFlow<()>;

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub scenario: &'a ScenarioDef,
    pub options: SeirOptions,
}

/// Concise timing and execution summary for a run.
#[derive(Debug, Clone, Default)]
pub struct RunTimingSummary {
    pub validate_time_s: f64,
    pub simulate_time_s: f64,
    pub summarize_time_s: f64,
    pub total_time_s: f64,
    pub stats: SimStats,
}

/// Everything a frontend needs to display a finished run.
#[derive(Debug, Clone)]
pub struct RunResponse {
    pub parameters: ParameterSet,
    pub series: TimeSeries,
    pub summary: Summary,
    pub titles: ChartTitles,
    pub timing: RunTimingSummary,
}

fn emit_progress(
    progress_cb: &mut Option<ProgressCallback<'_>>,
    stage: RunStage,
    started: Instant,
) -> AppResult<()> {
    if let Some(cb) = progress_cb.as_deref_mut() {
        if cb(RunProgressEvent::stage(stage, started.elapsed().as_secs_f64())).is_break() {
            return Err(AppError::Cancelled);
        }
    }
    Ok(())
}

/// Validate, simulate and summarize a scenario.
pub fn run_scenario(request: &RunRequest) -> AppResult<RunResponse> {
    run_scenario_with_progress(request, None)
}

/// Same as [`run_scenario`], reporting stage changes and per-day progress.
///
/// The callback may cancel at any point, which yields [`AppError::Cancelled`].
pub fn run_scenario_with_progress(
    request: &RunRequest,
    mut progress: Option<ProgressCallback<'_>>,
) -> AppResult<RunResponse> {
    let started = Instant::now();
    let mut timing = RunTimingSummary::default();

    emit_progress(&mut progress, RunStage::Validating, started)?;
    let validate_started = Instant::now();
    let parameters = ds_project::validate_scenario(request.scenario)?;
    timing.validate_time_s = validate_started.elapsed().as_secs_f64();

    emit_progress(&mut progress, RunStage::Simulating, started)?;
    let simulate_started = Instant::now();
    let duration_days = parameters.duration_days();
    let run = match progress.as_deref_mut() {
        Some(cb) => {
            let mut forward = |p: &SimProgress| {
                cb(RunProgressEvent {
                    stage: RunStage::Simulating,
                    elapsed_wall_s: started.elapsed().as_secs_f64(),
                    day: Some(p.step),
                    duration_days: Some(duration_days),
                    fraction_complete: p.fraction_complete(),
                })
            };
            simulate_with_progress(&parameters, &request.options, Some(&mut forward))?
        }
        None => simulate_with_progress(&parameters, &request.options, None)?,
    };
    timing.simulate_time_s = simulate_started.elapsed().as_secs_f64();
    timing.stats = run.stats;

    emit_progress(&mut progress, RunStage::Summarizing, started)?;
    let summarize_started = Instant::now();
    let summary = summarize(&run.series, &request.scenario.calendar())?;
    let titles = chart_titles(request.scenario, duration_days);
    timing.summarize_time_s = summarize_started.elapsed().as_secs_f64();

    timing.total_time_s = started.elapsed().as_secs_f64();
    emit_progress(&mut progress, RunStage::Completed, started)?;

    info!(
        scenario = request.scenario.display_name().unwrap_or("unnamed"),
        peak_day = summary.peak_day,
        total_estimated_cases = summary.total_estimated_cases,
        total_time_s = timing.total_time_s,
        "scenario run finished"
    );

    Ok(RunResponse {
        parameters,
        series: run.series,
        summary,
        titles,
        timing,
    })
}
