//! Shared application service layer for denguesim.
//!
//! This crate provides a unified interface for frontends, centralizing the
//! validate -> simulate -> summarize pipeline, chart labelling and parameter
//! sweeps.

pub mod error;
pub mod labels;
pub mod progress;
pub mod run_service;
pub mod sweep;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use labels::{ChartTitles, chart_titles};
pub use progress::{RunProgressEvent, RunStage};
pub use run_service::{
    ProgressCallback, RunRequest, RunResponse, RunTimingSummary, run_scenario,
    run_scenario_with_progress,
};
pub use sweep::{SweepPoint, sweep_seasonal_strength};
