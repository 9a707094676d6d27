use thiserror::Error;

use crate::model::{QuizSettingsError, UnknownCategory};

/// Errors raised while turning user configuration into quiz settings.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Settings(#[from] QuizSettingsError),
    #[error(transparent)]
    Category(#[from] UnknownCategory),
}
