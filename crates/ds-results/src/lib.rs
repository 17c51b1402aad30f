//! ds-results: summaries and queries over completed SEIR runs.

pub mod query;
pub mod summary;

pub use query::{Variable, extract_series, write_series_csv, write_variable_csv};
pub use summary::{Summary, summarize};

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("Time series is empty")]
    EmptySeries,

    #[error("Unknown variable: {name} (expected one of s, e, i, r, beta)")]
    UnknownVariable { name: String },

    #[error("Calendar error: {0}")]
    Calendar(#[from] ds_core::CoreError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
