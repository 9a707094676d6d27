use thiserror::Error;

use crate::generator::DEFAULT_ATTEMPTS_PER_COUNTRY;
use crate::model::Category;

/// Questions per session unless configured otherwise.
pub const DEFAULT_TOTAL_QUESTIONS: u32 = 10;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSettingsError {
    #[error("total questions must be > 0")]
    InvalidTotalQuestions,

    #[error("attempts per country must be > 0")]
    InvalidAttemptsPerCountry,

    #[error("at least one question category is required")]
    NoCategories,
}

//
// ─── SETTINGS ─────────────────────────────────────────────────────────────────
//

/// Configuration for a quiz session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSettings {
    total_questions: u32,
    attempts_per_country: usize,
    categories: Vec<Category>,
    strict_selection: bool,
}

impl Default for QuizSettings {
    /// Ten questions over all six categories, lenient selection.
    fn default() -> Self {
        Self {
            total_questions: DEFAULT_TOTAL_QUESTIONS,
            attempts_per_country: DEFAULT_ATTEMPTS_PER_COUNTRY,
            categories: Category::ALL.to_vec(),
            strict_selection: false,
        }
    }
}

impl QuizSettings {
    /// Creates custom quiz settings.
    ///
    /// Duplicate categories are collapsed, keeping first occurrence order.
    ///
    /// # Errors
    ///
    /// Returns error if a count is zero or no category is given.
    pub fn new(
        total_questions: u32,
        attempts_per_country: usize,
        categories: impl IntoIterator<Item = Category>,
        strict_selection: bool,
    ) -> Result<Self, QuizSettingsError> {
        if total_questions == 0 {
            return Err(QuizSettingsError::InvalidTotalQuestions);
        }
        if attempts_per_country == 0 {
            return Err(QuizSettingsError::InvalidAttemptsPerCountry);
        }
        let mut unique = Vec::new();
        for category in categories {
            if !unique.contains(&category) {
                unique.push(category);
            }
        }
        if unique.is_empty() {
            return Err(QuizSettingsError::NoCategories);
        }

        Ok(Self {
            total_questions,
            attempts_per_country,
            categories: unique,
            strict_selection,
        })
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn attempts_per_country(&self) -> usize {
        self.attempts_per_country
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// When set, selecting a string that is not an option is an error instead of a no-op.
    #[must_use]
    pub fn strict_selection(&self) -> bool {
        self.strict_selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_all_categories() {
        let settings = QuizSettings::default();
        assert_eq!(settings.total_questions(), 10);
        assert_eq!(settings.categories(), &Category::ALL);
        assert!(!settings.strict_selection());
    }

    #[test]
    fn rejects_zero_counts_and_empty_categories() {
        assert_eq!(
            QuizSettings::new(0, 8, Category::ALL, false),
            Err(QuizSettingsError::InvalidTotalQuestions)
        );
        assert_eq!(
            QuizSettings::new(10, 0, Category::ALL, false),
            Err(QuizSettingsError::InvalidAttemptsPerCountry)
        );
        assert_eq!(
            QuizSettings::new(10, 8, Vec::new(), false),
            Err(QuizSettingsError::NoCategories)
        );
    }

    #[test]
    fn collapses_duplicate_categories() {
        let settings = QuizSettings::new(
            5,
            8,
            [Category::Flag, Category::Region, Category::Flag],
            true,
        )
        .unwrap();
        assert_eq!(settings.categories(), &[Category::Flag, Category::Region]);
        assert!(settings.strict_selection());
    }
}
