#![forbid(unsafe_code)]

pub mod dataset;
pub mod error;
pub mod quiz;

pub use geoquiz_core::{Clock, RandomSource};

pub use dataset::{load_countries, parse_countries};
pub use error::{DatasetError, QuizError};
pub use quiz::{IgnoredSelection, QuizPhase, QuizProgress, QuizSession, QuizState, SelectionOutcome};
