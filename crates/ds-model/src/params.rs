//! Simulation parameters and their validation.

use ds_core::is_whole;
use serde::{Deserialize, Serialize};

/// Accepted range for `seasonal_strength`. Keeps beta(t) non-negative.
pub const SEASONAL_STRENGTH_RANGE: (f64, f64) = (0.0, 1.0);

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} (must be a finite number)")]
    NonFinite { field: &'static str, value: f64 },

    #[error("Invalid value: {field} = {value} (must be greater than 0)")]
    NonPositive { field: &'static str, value: f64 },

    #[error("Invalid value: {field} = {value} (must not be negative)")]
    Negative { field: &'static str, value: f64 },

    #[error("Invalid value: {field} = {value} (must be a whole number)")]
    NotInteger { field: &'static str, value: f64 },

    #[error("Invalid value: {field} = {value} (must be within [{min}, {max}])")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error(
        "Invalid value: initial_exposed + initial_infected + initial_recovered = {seeded} \
         (must not exceed population = {population})"
    )]
    SeedExceedsPopulation { seeded: u64, population: u64 },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NonFinite { field, .. }
            | ValidationError::NonPositive { field, .. }
            | ValidationError::Negative { field, .. }
            | ValidationError::NotInteger { field, .. }
            | ValidationError::OutOfRange { field, .. } => field,
            ValidationError::SeedExceedsPopulation { .. } => "population",
        }
    }
}

/// Unvalidated parameters as they arrive from a form, a scenario file or a
/// spreadsheet row. Counts are carried as reals because that is how cells and
/// text fields deliver them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawParameters {
    pub population: f64,
    #[serde(default)]
    pub initial_exposed: f64,
    pub initial_infected: f64,
    #[serde(default)]
    pub initial_recovered: f64,
    pub incubation_days: f64,
    pub infectious_days: f64,
    pub duration_days: f64,
    #[serde(default)]
    pub seasonal_strength: f64,
    pub beta0: f64,
}

/// Validated, immutable simulation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    population: u64,
    initial_exposed: u64,
    initial_infected: u64,
    initial_recovered: u64,
    initial_susceptible: u64,
    incubation_days: f64,
    infectious_days: f64,
    duration_days: u32,
    seasonal_strength: f64,
    beta0: f64,
    sigma: f64,
    gamma: f64,
}

impl ParameterSet {
    /// Validate raw input. Fails on the first violated constraint.
    pub fn new(raw: &RawParameters) -> Result<Self, ValidationError> {
        let population = whole_count("population", raw.population)?;
        if population == 0 {
            return Err(ValidationError::NonPositive {
                field: "population",
                value: raw.population,
            });
        }

        let initial_exposed = whole_count("initial_exposed", raw.initial_exposed)?;
        let initial_infected = whole_count("initial_infected", raw.initial_infected)?;
        let initial_recovered = whole_count("initial_recovered", raw.initial_recovered)?;

        let seeded = initial_exposed
            .saturating_add(initial_infected)
            .saturating_add(initial_recovered);
        if seeded > population {
            return Err(ValidationError::SeedExceedsPopulation { seeded, population });
        }

        let incubation_days = positive("incubation_days", raw.incubation_days)?;
        let infectious_days = positive("infectious_days", raw.infectious_days)?;

        let duration = whole_count("duration_days", raw.duration_days)?;
        if duration == 0 {
            return Err(ValidationError::NonPositive {
                field: "duration_days",
                value: raw.duration_days,
            });
        }
        let duration_days = u32::try_from(duration).map_err(|_| ValidationError::OutOfRange {
            field: "duration_days",
            value: raw.duration_days,
            min: 1.0,
            max: f64::from(u32::MAX),
        })?;

        let (min, max) = SEASONAL_STRENGTH_RANGE;
        let seasonal_strength = finite("seasonal_strength", raw.seasonal_strength)?;
        if !(min..=max).contains(&seasonal_strength) {
            return Err(ValidationError::OutOfRange {
                field: "seasonal_strength",
                value: seasonal_strength,
                min,
                max,
            });
        }

        let beta0 = positive("beta0", raw.beta0)?;

        Ok(Self {
            population,
            initial_exposed,
            initial_infected,
            initial_recovered,
            initial_susceptible: population - seeded,
            incubation_days,
            infectious_days,
            duration_days,
            seasonal_strength,
            beta0,
            sigma: 1.0 / incubation_days,
            gamma: 1.0 / infectious_days,
        })
    }

    /// Copy with a different seasonal strength, re-validated.
    pub fn with_seasonal_strength(&self, seasonal_strength: f64) -> Result<Self, ValidationError> {
        let mut raw = RawParameters::from(self);
        raw.seasonal_strength = seasonal_strength;
        Self::new(&raw)
    }

    pub fn population(&self) -> u64 {
        self.population
    }

    pub fn initial_exposed(&self) -> u64 {
        self.initial_exposed
    }

    pub fn initial_infected(&self) -> u64 {
        self.initial_infected
    }

    pub fn initial_recovered(&self) -> u64 {
        self.initial_recovered
    }

    /// S0 = N - E0 - I0 - R0.
    pub fn initial_susceptible(&self) -> u64 {
        self.initial_susceptible
    }

    pub fn incubation_days(&self) -> f64 {
        self.incubation_days
    }

    pub fn infectious_days(&self) -> f64 {
        self.infectious_days
    }

    pub fn duration_days(&self) -> u32 {
        self.duration_days
    }

    pub fn seasonal_strength(&self) -> f64 {
        self.seasonal_strength
    }

    pub fn beta0(&self) -> f64 {
        self.beta0
    }

    /// E -> I progression rate (1/day).
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// I -> R recovery rate (1/day).
    pub fn gamma(&self) -> f64 {
        self.gamma
    }
}

impl TryFrom<RawParameters> for ParameterSet {
    type Error = ValidationError;

    fn try_from(raw: RawParameters) -> Result<Self, Self::Error> {
        ParameterSet::new(&raw)
    }
}

impl From<&ParameterSet> for RawParameters {
    fn from(p: &ParameterSet) -> Self {
        Self {
            population: p.population as f64,
            initial_exposed: p.initial_exposed as f64,
            initial_infected: p.initial_infected as f64,
            initial_recovered: p.initial_recovered as f64,
            incubation_days: p.incubation_days,
            infectious_days: p.infectious_days,
            duration_days: f64::from(p.duration_days),
            seasonal_strength: p.seasonal_strength,
            beta0: p.beta0,
        }
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NonFinite { field, value })
    }
}

fn positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if value <= 0.0 {
        return Err(ValidationError::NonPositive { field, value });
    }
    Ok(value)
}

fn whole_count(field: &'static str, value: f64) -> Result<u64, ValidationError> {
    let value = finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::Negative { field, value });
    }
    if !is_whole(value) {
        return Err(ValidationError::NotInteger { field, value });
    }
    if value > u64::MAX as f64 {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min: 0.0,
            max: u64::MAX as f64,
        });
    }
    Ok(value as u64)
}
