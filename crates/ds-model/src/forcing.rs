//! Seasonal forcing of the transmission coefficient.

use std::f64::consts::PI;

use crate::params::ParameterSet;

/// Period of the seasonal cycle (days).
pub const SEASONAL_PERIOD_DAYS: f64 = 365.0;

/// beta(t) = beta0 * (1 + strength * sin(2*pi*t / 365)).
pub fn seasonal_beta(t: f64, beta0: f64, strength: f64) -> f64 {
    beta0 * (1.0 + strength * (2.0 * PI * t / SEASONAL_PERIOD_DAYS).sin())
}

/// Time-varying transmission coefficient for one parameter set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeasonalForcing {
    beta0: f64,
    strength: f64,
}

impl SeasonalForcing {
    pub fn new(beta0: f64, strength: f64) -> Self {
        Self { beta0, strength }
    }

    pub fn from_params(params: &ParameterSet) -> Self {
        Self::new(params.beta0(), params.seasonal_strength())
    }

    /// Transmission coefficient at day `t` (0-based, may be fractional).
    pub fn beta_at(&self, t: f64) -> f64 {
        seasonal_beta(t, self.beta0, self.strength)
    }

    pub fn beta0(&self) -> f64 {
        self.beta0
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }
}
