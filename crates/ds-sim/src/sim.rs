//! Fixed-interval simulation loop and result recording.

use std::ops::ControlFlow;

use tracing::{debug, warn};

use crate::error::{SimError, SimResult};
use crate::integrator::{ForwardEuler, Integrator, RK4};
use crate::model::TransientModel;

/// Integrator selection for simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegratorType {
    /// 4th-order Runge-Kutta (default, most accurate, 4 rhs calls per step).
    #[default]
    RK4,
    /// Forward Euler (1st-order, 1 rhs call per step).
    ForwardEuler,
}

/// Options for simulation runs.
#[derive(Clone, Debug)]
pub struct SimOptions {
    /// Recording interval; every interval produces one record
    pub dt: f64,
    /// Number of intervals to advance
    pub steps: usize,
    /// Integrator type (default: RK4)
    pub integrator: IntegratorType,
    /// Integrator substeps per interval before any cut-back
    pub substeps: usize,
    /// How many times an interval may halve its substep before the state is repaired
    pub max_cutbacks: usize,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            dt: 1.0,
            steps: 1,
            integrator: IntegratorType::default(),
            substeps: 1,
            max_cutbacks: 6,
        }
    }
}

/// Progress reported after every completed interval.
#[derive(Clone, Copy, Debug)]
pub struct SimProgress {
    pub step: usize,
    pub steps: usize,
    pub t: f64,
}

impl SimProgress {
    pub fn fraction_complete(&self) -> f64 {
        if self.steps == 0 {
            1.0
        } else {
            self.step as f64 / self.steps as f64
        }
    }
}

/// Counters describing how hard the loop had to work.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimStats {
    /// Integrator steps taken, including discarded attempts
    pub integrator_steps: usize,
    /// Intervals recomputed with a halved substep
    pub cutbacks: usize,
    /// Substeps whose state had to be repaired
    pub repairs: usize,
}

/// Record of simulation results.
#[derive(Clone, Debug)]
pub struct SimRecord<S> {
    /// Time points, one per interval boundary including t = 0
    pub t: Vec<f64>,
    /// State snapshots
    pub x: Vec<S>,
    pub stats: SimStats,
}

/// Run a fixed-interval transient simulation.
pub fn run_sim<M: TransientModel>(model: &M, opts: &SimOptions) -> SimResult<SimRecord<M::State>> {
    run_sim_with_progress(model, opts, None)
}

/// Run a fixed-interval transient simulation, reporting progress after each interval.
///
/// The callback may return `ControlFlow::Break(())` to stop the run, which then
/// fails with `SimError::Cancelled`.
pub fn run_sim_with_progress<M: TransientModel>(
    model: &M,
    opts: &SimOptions,
    mut progress: Option<&mut dyn FnMut(&SimProgress) -> ControlFlow<()>>,
) -> SimResult<SimRecord<M::State>> {
    if opts.dt <= 0.0 || !opts.dt.is_finite() {
        return Err(SimError::InvalidArg {
            what: "dt must be positive and finite",
        });
    }
    if opts.substeps == 0 {
        return Err(SimError::InvalidArg {
            what: "substeps must be positive",
        });
    }

    let mut x = model.initial_state();
    let mut t_record = Vec::with_capacity(opts.steps + 1);
    let mut x_record = Vec::with_capacity(opts.steps + 1);
    t_record.push(0.0);
    x_record.push(x.clone());

    let mut stats = SimStats::default();

    for step in 0..opts.steps {
        let t = step as f64 * opts.dt;
        x = match opts.integrator {
            IntegratorType::RK4 => advance_interval(&RK4, model, t, &x, opts, &mut stats)?,
            IntegratorType::ForwardEuler => {
                advance_interval(&ForwardEuler, model, t, &x, opts, &mut stats)?
            }
        };

        let t_next = (step + 1) as f64 * opts.dt;
        t_record.push(t_next);
        x_record.push(x.clone());

        if let Some(cb) = progress.as_deref_mut() {
            let event = SimProgress {
                step: step + 1,
                steps: opts.steps,
                t: t_next,
            };
            if cb(&event).is_break() {
                return Err(SimError::Cancelled {
                    steps_done: step + 1,
                    steps: opts.steps,
                });
            }
        }
    }

    Ok(SimRecord {
        t: t_record,
        x: x_record,
        stats,
    })
}

/// Advance one recording interval.
///
/// Any substep the model rejects discards the attempt and the interval is
/// recomputed with twice as many substeps. Once the cut-back budget is spent,
/// rejected substeps are repaired in place.
fn advance_interval<M: TransientModel, I: Integrator>(
    integrator: &I,
    model: &M,
    t: f64,
    x: &M::State,
    opts: &SimOptions,
    stats: &mut SimStats,
) -> SimResult<M::State> {
    let mut substeps = opts.substeps;
    let mut cutbacks = 0;

    loop {
        let h = opts.dt / substeps as f64;
        let exhausted = cutbacks >= opts.max_cutbacks;
        let mut y = x.clone();
        let mut rejected = false;

        for k in 0..substeps {
            let next = integrator.step(model, t + k as f64 * h, &y, h)?;
            stats.integrator_steps += 1;
            if model.admissible_step(&y, &next) {
                y = next;
                continue;
            }
            if exhausted {
                warn!(t, substeps, "step still inadmissible after cut-backs, repairing");
                stats.repairs += 1;
                y = model.repair(&y, next);
            } else {
                rejected = true;
                break;
            }
        }

        if !rejected {
            return Ok(y);
        }

        cutbacks += 1;
        stats.cutbacks += 1;
        substeps *= 2;
        debug!(t, substeps, "inadmissible step, cutting back");
    }
}
