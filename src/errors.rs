use thiserror::Error;

// Bring in specific errors from other modules we want to wrap
use crate::config::ConfigError;

/// Conditions under which a token cannot be split against its oracle.
///
/// These are never fatal: [`crate::fit::fit`] recovers from them by returning
/// the token unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error(
        "Could not fit token: no line length at character {offset} lands in the fit band \
         ({remaining} characters remaining)"
    )]
    MeasurementInconsistency { offset: usize, remaining: usize },

    #[error("Could not fit token: line at character {offset} did not settle after {attempts} retries")]
    RetryLimit { offset: usize, attempts: usize },
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fit error: {0}")]
    Fit(#[from] FitError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
