//! ODE systems that can be stepped by the fixed-interval loop.

use crate::error::SimResult;

/// A continuous-time system x' = f(t, x) over an owned state type.
///
/// Integrators only need the vector-space operations `add` and `scale`, so a
/// state can be a plain struct rather than a dense vector.
///
/// `admissible`, `admissible_step` and `repair` describe a constrained state
/// space (for example non-negative head counts). The loop retries a rejected step with smaller
/// substeps before it falls back to `repair`.
pub trait TransientModel {
    type State: Clone;

    /// State at t = 0.
    fn initial_state(&self) -> Self::State;

    /// Time derivative at `(t, x)`.
    fn rhs(&self, t: f64, x: &Self::State) -> SimResult<Self::State>;

    fn add(&self, a: &Self::State, b: &Self::State) -> Self::State;

    fn scale(&self, a: &Self::State, factor: f64) -> Self::State;

    fn admissible(&self, _x: &Self::State) -> bool {
        true
    }

    /// Whether the step `prev -> next` is acceptable. Models with monotone
    /// quantities override this to reject steps that reverse them.
    fn admissible_step(&self, _prev: &Self::State, next: &Self::State) -> bool {
        self.admissible(next)
    }

    /// Project a rejected step back into the valid set, given the state it
    /// started from.
    fn repair(&self, _prev: &Self::State, next: Self::State) -> Self::State {
        next
    }
}
