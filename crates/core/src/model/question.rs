use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::model::category::Category;

/// Number of options every question carries.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question must have exactly {OPTION_COUNT} options, got {0}")]
    OptionCount(usize),

    #[error("question options must be distinct and non-empty")]
    DuplicateOption,

    #[error("correct answer is not among the options")]
    MissingCorrectAnswer,
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question ready for display.
///
/// Options are exactly [`OPTION_COUNT`] distinct, non-empty strings and the
/// correct answer is one of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    category: Category,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    options: Vec<String>,
    correct_answer: String,
}

impl Question {
    /// Builds a question, validating the option invariant.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is empty, the option count is wrong,
    /// options repeat, or the correct answer is not an option.
    pub fn new(
        category: Category,
        prompt: impl Into<String>,
        image_url: Option<String>,
        options: Vec<String>,
        correct_answer: impl Into<String>,
    ) -> Result<Self, QuestionError> {
        let prompt = prompt.into();
        let correct_answer = correct_answer.into();

        if prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if options.len() != OPTION_COUNT {
            return Err(QuestionError::OptionCount(options.len()));
        }
        let mut seen = HashSet::with_capacity(OPTION_COUNT);
        if options.iter().any(|o| o.is_empty() || !seen.insert(o.as_str())) {
            return Err(QuestionError::DuplicateOption);
        }
        if !options.contains(&correct_answer) {
            return Err(QuestionError::MissingCorrectAnswer);
        }

        Ok(Self {
            category,
            prompt,
            image_url,
            options,
            correct_answer,
        })
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Flag image to show instead of a textual subject; set for flag questions only.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &str {
        &self.correct_answer
    }

    /// Position of the correct answer within [`Question::options`].
    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.options
            .iter()
            .position(|o| *o == self.correct_answer)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    #[must_use]
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_answer == option
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn valid_question_reports_correct_index() {
        let q = Question::new(
            Category::Capital,
            "What is the capital of France?",
            None,
            opts(&["Berlin", "Paris", "Rome", "Madrid"]),
            "Paris",
        )
        .unwrap();
        assert_eq!(q.correct_index(), 1);
        assert!(q.is_correct("Paris"));
        assert!(!q.is_correct("paris"));
        assert!(q.has_option("Rome"));
    }

    #[test]
    fn rejects_wrong_option_count() {
        let err = Question::new(Category::Flag, "Which?", None, opts(&["a", "b", "c"]), "a")
            .unwrap_err();
        assert_eq!(err, QuestionError::OptionCount(3));
    }

    #[test]
    fn rejects_duplicates_and_blank_options() {
        let dup = Question::new(Category::Flag, "Which?", None, opts(&["a", "b", "a", "c"]), "a");
        assert_eq!(dup.unwrap_err(), QuestionError::DuplicateOption);

        let blank = Question::new(Category::Flag, "Which?", None, opts(&["a", "", "b", "c"]), "a");
        assert_eq!(blank.unwrap_err(), QuestionError::DuplicateOption);
    }

    #[test]
    fn rejects_missing_correct_answer() {
        let err = Question::new(Category::Region, "Where?", None, opts(&["a", "b", "c", "d"]), "e")
            .unwrap_err();
        assert_eq!(err, QuestionError::MissingCorrectAnswer);
    }

    #[test]
    fn rejects_empty_prompt() {
        let err = Question::new(Category::Region, " ", None, opts(&["a", "b", "c", "d"]), "a")
            .unwrap_err();
        assert_eq!(err, QuestionError::EmptyPrompt);
    }
}
