//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered during a simulation run.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition at t = {t}: {what}")]
    NonPhysical { what: &'static str, t: f64 },

    #[error("Simulation cancelled after {steps_done} of {steps} steps")]
    Cancelled { steps_done: usize, steps: usize },
}

pub type SimResult<T> = Result<T, SimError>;
