//! Deterministic time integration for the dengue SEIR model.
//!
//! Provides:
//! - `TransientModel` trait for pluggable ODE systems
//! - Fixed-step RK4 and forward Euler integrators
//! - Fixed-interval simulation loop with undershoot cut-backs
//! - SEIR right-hand side with seasonal forcing
//! - Day-by-day SEIR runner producing a `TimeSeries`

pub mod error;
pub mod integrator;
pub mod model;
pub mod runner;
pub mod seir;
pub mod sim;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use integrator::{ForwardEuler, Integrator, RK4};
pub use model::TransientModel;
pub use runner::{SeirOptions, SeirRun, simulate, simulate_with_progress};
pub use seir::SeirModel;
pub use sim::{
    IntegratorType, SimOptions, SimProgress, SimRecord, SimStats, run_sim, run_sim_with_progress,
};
