mod category;
mod country;
mod question;
mod settings;
mod summary;

pub use category::{Category, Region, UnknownCategory};
pub use country::{Country, Currency, Language};
pub use question::{OPTION_COUNT, Question, QuestionError};
pub use settings::{DEFAULT_TOTAL_QUESTIONS, QuizSettings, QuizSettingsError};
pub use summary::{CategoryScore, QuizSummary, QuizSummaryError, QuizTurn};
