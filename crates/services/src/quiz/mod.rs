mod progress;
mod session;
mod state;

// Public API of the quiz subsystem.
pub use crate::error::QuizError;
pub use progress::QuizProgress;
pub use session::QuizSession;
pub use state::{IgnoredSelection, QuizPhase, QuizState, SelectionOutcome};
