//! SEIR right-hand side with seasonal forcing.

use ds_model::{ParameterSet, SeasonalForcing, SeirState};

use crate::error::SimResult;
use crate::model::TransientModel;

/// Closed-population SEIR dynamics:
///
/// ```text
/// dS = -beta(t) S I / N
/// dE =  beta(t) S I / N - sigma E
/// dI =  sigma E - gamma I
/// dR =  gamma I
/// ```
#[derive(Clone, Debug)]
pub struct SeirModel {
    forcing: SeasonalForcing,
    sigma: f64,
    gamma: f64,
    population: f64,
    initial: SeirState,
}

impl SeirModel {
    pub fn new(params: &ParameterSet) -> Self {
        Self {
            forcing: SeasonalForcing::from_params(params),
            sigma: params.sigma(),
            gamma: params.gamma(),
            population: params.population() as f64,
            initial: SeirState::initial(params),
        }
    }

    pub fn forcing(&self) -> &SeasonalForcing {
        &self.forcing
    }

    pub fn population(&self) -> f64 {
        self.population
    }

    /// Derivatives for a given transmission coefficient.
    pub fn derivatives(&self, beta: f64, x: &SeirState) -> SeirState {
        let infection = beta * x.s * x.i / self.population;
        let onset = self.sigma * x.e;
        let recovery = self.gamma * x.i;
        SeirState::new(
            -infection,
            infection - onset,
            onset - recovery,
            recovery,
        )
    }

    /// One forward-Euler day with an explicit beta: x + 1 day * f(x).
    pub fn euler_day(&self, beta: f64, x: &SeirState) -> SeirState {
        x.add(&self.derivatives(beta, x))
    }
}

impl TransientModel for SeirModel {
    type State = SeirState;

    fn initial_state(&self) -> SeirState {
        self.initial
    }

    fn rhs(&self, t: f64, x: &SeirState) -> SimResult<SeirState> {
        Ok(self.derivatives(self.forcing.beta_at(t), x))
    }

    fn add(&self, a: &SeirState, b: &SeirState) -> SeirState {
        a.add(b)
    }

    fn scale(&self, a: &SeirState, scale: f64) -> SeirState {
        a.scale(scale)
    }

    fn admissible(&self, x: &SeirState) -> bool {
        x.is_finite() && x.min_compartment() >= 0.0
    }

    /// S only ever drains, so a step that raises it is rejected too.
    fn admissible_step(&self, prev: &SeirState, next: &SeirState) -> bool {
        next.s <= prev.s && self.admissible(next)
    }

    fn repair(&self, prev: &SeirState, next: SeirState) -> SeirState {
        next.repaired_from(prev, self.population)
    }
}
