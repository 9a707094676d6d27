use serde::Serialize;

use geoquiz_core::model::Question;

/// Where a session is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuizPhase {
    /// A question is on screen and no option has been picked.
    AwaitingAnswer,
    /// An option is locked in for the current question.
    Answered,
    /// All questions have been issued; terminal.
    Completed,
}

/// Read-only snapshot of a session, handed to the presentation layer after each call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizState {
    pub question_index: u32,
    pub total_questions: u32,
    pub score: u32,
    pub current_question: Option<Question>,
    pub answered: bool,
    pub selected_option: Option<String>,
}

impl QuizState {
    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        match (&self.current_question, self.answered) {
            (None, _) => QuizPhase::Completed,
            (Some(_), true) => QuizPhase::Answered,
            (Some(_), false) => QuizPhase::AwaitingAnswer,
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current_question.is_none()
    }
}

/// Why a selection left the session unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredSelection {
    AlreadyAnswered,
    Completed,
    NotAnOption,
}

/// Result of `QuizSession::select_option`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Recorded {
        correct: bool,
        correct_answer: String,
    },
    Ignored(IgnoredSelection),
}

impl SelectionOutcome {
    #[must_use]
    pub fn is_recorded(&self) -> bool {
        matches!(self, SelectionOutcome::Recorded { .. })
    }
}
