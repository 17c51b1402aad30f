//! Compartment state.

use serde::{Deserialize, Serialize};

use crate::params::ParameterSet;

/// Susceptible, exposed, infected and recovered head counts.
///
/// Counts are continuous: the differential system is continuous-state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeirState {
    pub s: f64,
    pub e: f64,
    pub i: f64,
    pub r: f64,
}

impl SeirState {
    pub fn new(s: f64, e: f64, i: f64, r: f64) -> Self {
        Self { s, e, i, r }
    }

    /// Day-0 state seeded from the parameter set.
    pub fn initial(params: &ParameterSet) -> Self {
        Self::new(
            params.initial_susceptible() as f64,
            params.initial_exposed() as f64,
            params.initial_infected() as f64,
            params.initial_recovered() as f64,
        )
    }

    pub fn total(&self) -> f64 {
        self.s + self.e + self.i + self.r
    }

    pub fn min_compartment(&self) -> f64 {
        self.s.min(self.e).min(self.i).min(self.r)
    }

    pub fn is_finite(&self) -> bool {
        self.s.is_finite() && self.e.is_finite() && self.i.is_finite() && self.r.is_finite()
    }

    /// Element-wise sum.
    pub fn add(&self, other: &Self) -> Self {
        Self::new(
            self.s + other.s,
            self.e + other.e,
            self.i + other.i,
            self.r + other.r,
        )
    }

    /// Element-wise scaling.
    pub fn scale(&self, factor: f64) -> Self {
        Self::new(
            self.s * factor,
            self.e * factor,
            self.i * factor,
            self.r * factor,
        )
    }

    /// Bring a rejected step back to a valid state reachable from `prev`.
    ///
    /// Negatives are clamped to zero and S is capped at `prev.s`. E, I and R
    /// are then rescaled so the total is `population`. When nothing is left
    /// outside S to rescale, the step is dropped and `prev` is returned.
    pub fn repaired_from(&self, prev: &SeirState, population: f64) -> Self {
        let s = self.s.max(0.0).min(prev.s.max(0.0));
        let e = self.e.max(0.0);
        let i = self.i.max(0.0);
        let r = self.r.max(0.0);
        let rest = e + i + r;
        if rest <= 0.0 {
            return *prev;
        }
        let factor = (population - s) / rest;
        Self::new(s, e * factor, i * factor, r * factor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic() {
        let a = SeirState::new(1.0, 2.0, 3.0, 4.0);
        let b = a.add(&a.scale(0.5));
        assert_eq!(b, SeirState::new(1.5, 3.0, 4.5, 6.0));
        assert_eq!(a.total(), 10.0);
        assert_eq!(a.min_compartment(), 1.0);
    }

    #[test]
    fn repair_restores_total_and_sign() {
        let prev = SeirState::new(10.0, 10.0, 70.0, 10.0);
        let undershoot = SeirState::new(-0.5, 10.0, 80.5, 10.0);
        let fixed = undershoot.repaired_from(&prev, 100.0);
        assert!(fixed.min_compartment() >= 0.0);
        assert_eq!(fixed.s, 0.0);
        assert!((fixed.total() - 100.0).abs() < 1e-12);
    }

    #[test]
    fn repair_never_returns_mass_to_susceptibles() {
        let prev = SeirState::new(1.0, 0.0, 999.0, 0.0);
        // non-negative but S grew and I collapsed below zero
        let bad = SeirState::new(400.0, 0.0, -300.0, 900.0);
        let fixed = bad.repaired_from(&prev, 1000.0);
        assert!(fixed.s <= prev.s);
        assert!(fixed.min_compartment() >= 0.0);
        assert!((fixed.total() - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn repair_without_anything_to_rescale_keeps_previous_state() {
        let prev = SeirState::new(500.0, 0.0, 500.0, 0.0);
        let bad = SeirState::new(400.0, -1.0, -2.0, -3.0);
        assert_eq!(bad.repaired_from(&prev, 1000.0), prev);
    }
}
