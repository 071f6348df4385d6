//! Error types for cg-output.

use cg_core::CoreError;
use thiserror::Error;

/// Errors that can occur when writing simulation output.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("could not save run parameters: {0}")]
    Parameters(#[from] CoreError),

    #[error("invalid run directory setting: {0}")]
    RunDirectory(String),
}

/// Alias for `Result<T, OutputError>`.
pub type OutputResult<T> = Result<T, OutputError>;
