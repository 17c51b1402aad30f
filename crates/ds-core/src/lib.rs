//! ds-core: stable foundation for denguesim.
//!
//! Contains:
//! - numeric (tolerances + float helpers)
//! - calendar (day index to month mapping)
//! - error (shared error types)

pub mod calendar;
pub mod error;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use calendar::{DAYS_PER_MONTH, DAYS_PER_YEAR, MONTH_NAMES, MonthCalendar, month_name};
pub use error::{CoreError, CoreResult};
pub use numeric::{Tolerances, is_whole, nearly_equal};
