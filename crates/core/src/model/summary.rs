use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::Category;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSummaryError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("{turns} turns recorded for a {total}-question quiz")]
    TooManyTurns { turns: usize, total: u32 },
}

/// Outcome of one issued question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizTurn {
    /// 1-based position of the question in the session.
    pub number: u32,
    pub category: Category,
    pub correct_answer: String,
    /// `None` when the question was skipped.
    pub selected: Option<String>,
    pub correct: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryScore {
    pub asked: u32,
    pub correct: u32,
}

/// Final result of a completed quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSummary {
    total_questions: u32,
    score: u32,
    answered: u32,
    by_category: BTreeMap<Category, CategoryScore>,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
}

impl QuizSummary {
    /// Build a summary from the turns of a finished session.
    ///
    /// # Errors
    ///
    /// Returns `QuizSummaryError::InvalidTimeRange` if `completed_at` is before `started_at`.
    /// Returns `QuizSummaryError::TooManyTurns` if more turns than questions were recorded.
    pub fn from_turns(
        total_questions: u32,
        turns: &[QuizTurn],
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, QuizSummaryError> {
        if completed_at < started_at {
            return Err(QuizSummaryError::InvalidTimeRange);
        }
        if u32::try_from(turns.len()).map_or(true, |n| n > total_questions) {
            return Err(QuizSummaryError::TooManyTurns {
                turns: turns.len(),
                total: total_questions,
            });
        }

        let mut score = 0_u32;
        let mut answered = 0_u32;
        let mut by_category: BTreeMap<Category, CategoryScore> = BTreeMap::new();

        for turn in turns {
            let entry = by_category.entry(turn.category).or_default();
            entry.asked += 1;
            if turn.selected.is_some() {
                answered += 1;
            }
            if turn.correct {
                entry.correct += 1;
                score += 1;
            }
        }

        Ok(Self {
            total_questions,
            score,
            answered,
            by_category,
            started_at,
            completed_at,
        })
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Questions the player picked an option for (skips excluded).
    #[must_use]
    pub fn answered(&self) -> u32 {
        self.answered
    }

    #[must_use]
    pub fn by_category(&self) -> &BTreeMap<Category, CategoryScore> {
        &self.by_category
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Score as a percentage of total questions.
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        f64::from(self.score) * 100.0 / f64::from(self.total_questions)
    }
}
