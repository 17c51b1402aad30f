//! ds-model: the data the dengue SEIR engine works on.
//!
//! Contains:
//! - params (validated, immutable `ParameterSet` and its raw input form)
//! - forcing (seasonal transmission coefficient beta(t))
//! - state (S, E, I, R quadruple)
//! - series (per-day output records)

pub mod forcing;
pub mod params;
pub mod series;
pub mod state;

pub use forcing::{SEASONAL_PERIOD_DAYS, SeasonalForcing, seasonal_beta};
pub use params::{ParameterSet, RawParameters, ValidationError};
pub use series::{DayRecord, TimeSeries};
pub use state::SeirState;
