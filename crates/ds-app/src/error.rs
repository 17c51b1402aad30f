//! Error types for the ds-app service layer.

use ds_model::ValidationError;

/// Application error type that wraps errors from the backend crates
/// and provides a unified error interface for frontends.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid parameters: {0}")]
    Validation(#[from] ValidationError),

    #[error("Scenario error: {0}")]
    Project(String),

    #[error("Simulation error: {0}")]
    Simulation(String),

    #[error("Results error: {0}")]
    Results(String),

    #[error("Run cancelled")]
    Cancelled,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ds-app operations.
pub type AppResult<T> = Result<T, AppError>;

// Conversions from backend error types
impl From<ds_project::ProjectError> for AppError {
    fn from(err: ds_project::ProjectError) -> Self {
        match err {
            ds_project::ProjectError::Validation(e) => AppError::Validation(e),
            other => AppError::Project(other.to_string()),
        }
    }
}

impl From<ds_sim::SimError> for AppError {
    fn from(err: ds_sim::SimError) -> Self {
        match err {
            ds_sim::SimError::Cancelled { .. } => AppError::Cancelled,
            other => AppError::Simulation(other.to_string()),
        }
    }
}

impl From<ds_results::ResultsError> for AppError {
    fn from(err: ds_results::ResultsError) -> Self {
        AppError::Results(err.to_string())
    }
}
