//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use geoquiz_core::GeneratorError;
use geoquiz_core::model::{QuizSettingsError, QuizSummaryError};

/// Errors emitted by `QuizSession`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz is not completed yet")]
    NotCompleted,
    #[error("option {option:?} is not one of the current question's options")]
    InvalidSelection { option: String },
    #[error(transparent)]
    Generator(#[from] GeneratorError),
    #[error(transparent)]
    Settings(#[from] QuizSettingsError),
    #[error(transparent)]
    Summary(#[from] QuizSummaryError),
}

/// Errors emitted while loading a country dataset.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DatasetError {
    #[error("failed to read dataset {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset is not valid country JSON")]
    Parse(#[from] serde_json::Error),
}
