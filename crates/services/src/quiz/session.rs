use chrono::{DateTime, Utc};
use rand::Rng;
use rand::rngs::StdRng;
use std::fmt;
use tracing::{debug, info, warn};

use geoquiz_core::model::{Category, Country, Question, QuizSettings, QuizSummary, QuizTurn};
use geoquiz_core::{Clock, CountryPool, QuestionGenerator, RandomSource};

use super::progress::QuizProgress;
use super::state::{IgnoredSelection, QuizPhase, QuizState, SelectionOutcome};
use crate::error::QuizError;

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// A fixed-length quiz over a country pool.
///
/// The session owns its pool and RNG and is driven by its caller through
/// `advance`, `select_option` and `restart`. Every method runs to completion
/// synchronously; callers embedding it in an event loop serialize access through
/// `&mut self`.
pub struct QuizSession {
    pool: CountryPool,
    settings: QuizSettings,
    clock: Clock,
    rng: StdRng,
    question_index: u32,
    score: u32,
    current: Option<Question>,
    answered: bool,
    selected: Option<String>,
    turns: Vec<QuizTurn>,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start a ten-question quiz over `countries` with system time and entropy.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Generator` if the pool is empty or the first question
    /// cannot be generated.
    pub fn new(countries: Vec<Country>) -> Result<Self, QuizError> {
        Self::start(
            CountryPool::new(countries)?,
            QuizSettings::default(),
            Clock::default(),
            RandomSource::default(),
        )
    }

    /// Start a quiz and issue its first question.
    ///
    /// # Errors
    ///
    /// Propagates generator errors for the first question.
    pub fn start(
        pool: CountryPool,
        settings: QuizSettings,
        clock: Clock,
        random: RandomSource,
    ) -> Result<Self, QuizError> {
        let mut session = Self {
            pool,
            settings,
            clock,
            rng: random.rng(),
            question_index: 0,
            score: 0,
            current: None,
            answered: false,
            selected: None,
            turns: Vec::new(),
            started_at: clock.now(),
            completed_at: None,
        };

        let first = session.next_question()?;
        session.issue(first);
        Ok(session)
    }

    #[must_use]
    pub fn question_index(&self) -> u32 {
        self.question_index
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.settings.total_questions()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.answered
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    #[must_use]
    pub fn turns(&self) -> &[QuizTurn] {
        &self.turns
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        if self.is_complete() {
            QuizPhase::Completed
        } else if self.answered {
            QuizPhase::Answered
        } else {
            QuizPhase::AwaitingAnswer
        }
    }

    /// Snapshot of the session for the presentation layer.
    #[must_use]
    pub fn state(&self) -> QuizState {
        QuizState {
            question_index: self.question_index,
            total_questions: self.total_questions(),
            score: self.score,
            current_question: self.current.clone(),
            answered: self.answered,
            selected_option: self.selected.clone(),
        }
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        let total = self.total_questions();
        QuizProgress {
            issued: self.question_index,
            total,
            remaining: total.saturating_sub(self.question_index),
            score: self.score,
            is_complete: self.is_complete(),
        }
    }

    /// Move to the next question, or complete the quiz once every question was issued.
    ///
    /// Advancing past an unanswered question records it as skipped. Calling this on
    /// a completed session is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates generator errors; the session is left unchanged when one occurs.
    pub fn advance(&mut self) -> Result<QuizPhase, QuizError> {
        if self.is_complete() {
            return Ok(QuizPhase::Completed);
        }

        if self.question_index >= self.total_questions() {
            self.record_skip();
            self.current = None;
            self.answered = false;
            self.selected = None;
            self.completed_at = Some(self.clock.now());
            info!(
                score = self.score,
                total = self.total_questions(),
                "quiz completed"
            );
            return Ok(QuizPhase::Completed);
        }

        let question = self.next_question()?;
        self.record_skip();
        self.issue(question);
        Ok(QuizPhase::AwaitingAnswer)
    }

    /// Lock in `option` as the answer to the current question.
    ///
    /// Only the first selection per question counts; later ones, and any selection
    /// on a completed quiz, are ignored.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::InvalidSelection` for a string that is not an option,
    /// but only when strict selection is enabled; otherwise it is ignored.
    pub fn select_option(&mut self, option: &str) -> Result<SelectionOutcome, QuizError> {
        let Some(question) = self.current.as_ref() else {
            return Ok(SelectionOutcome::Ignored(IgnoredSelection::Completed));
        };
        if self.answered {
            return Ok(SelectionOutcome::Ignored(IgnoredSelection::AlreadyAnswered));
        }
        if !question.has_option(option) {
            if self.settings.strict_selection() {
                return Err(QuizError::InvalidSelection {
                    option: option.to_owned(),
                });
            }
            warn!(option, "ignoring selection that is not an option");
            return Ok(SelectionOutcome::Ignored(IgnoredSelection::NotAnOption));
        }

        let correct = question.is_correct(option);
        let turn = QuizTurn {
            number: self.question_index,
            category: question.category(),
            correct_answer: question.correct_answer().to_owned(),
            selected: Some(option.to_owned()),
            correct,
        };

        if correct {
            self.score += 1;
        }
        self.answered = true;
        self.selected = Some(option.to_owned());
        debug!(number = turn.number, correct, "selection recorded");

        let correct_answer = turn.correct_answer.clone();
        self.turns.push(turn);
        Ok(SelectionOutcome::Recorded {
            correct,
            correct_answer,
        })
    }

    /// Throw away all progress and start over with a fresh first question.
    ///
    /// # Errors
    ///
    /// Propagates generator errors; the session is left unchanged when one occurs.
    pub fn restart(&mut self) -> Result<QuizPhase, QuizError> {
        let first = self.next_question()?;

        self.score = 0;
        self.question_index = 0;
        self.turns.clear();
        self.started_at = self.clock.now();
        self.completed_at = None;
        self.issue(first);

        debug!("quiz restarted");
        Ok(QuizPhase::AwaitingAnswer)
    }

    /// Final result of a completed quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotCompleted` while questions remain.
    pub fn summary(&self) -> Result<QuizSummary, QuizError> {
        let Some(completed_at) = self.completed_at else {
            return Err(QuizError::NotCompleted);
        };
        Ok(QuizSummary::from_turns(
            self.total_questions(),
            &self.turns,
            self.started_at,
            completed_at,
        )?)
    }

    fn pick_category(&mut self) -> Category {
        let categories = self.settings.categories();
        categories[self.rng.random_range(0..categories.len())]
    }

    fn next_question(&mut self) -> Result<Question, QuizError> {
        let category = self.pick_category();
        let question = QuestionGenerator::new(&self.pool)
            .with_attempts_per_country(self.settings.attempts_per_country())
            .generate(category, &mut self.rng)?;
        Ok(question)
    }

    fn issue(&mut self, question: Question) {
        debug!(
            number = self.question_index + 1,
            category = %question.category(),
            "question issued"
        );
        self.current = Some(question);
        self.question_index += 1;
        self.answered = false;
        self.selected = None;
    }

    fn record_skip(&mut self) {
        if self.answered {
            return;
        }
        if let Some(question) = self.current.as_ref() {
            self.turns.push(QuizTurn {
                number: self.question_index,
                category: question.category(),
                correct_answer: question.correct_answer().to_owned(),
                selected: None,
                correct: false,
            });
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("pool_len", &self.pool.len())
            .field("question_index", &self.question_index)
            .field("score", &self.score)
            .field("answered", &self.answered)
            .field("turns_len", &self.turns.len())
            .field("started_at", &self.started_at)
            .field("completed_at", &self.completed_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use geoquiz_core::GeneratorError;
    use geoquiz_core::model::{Currency, Language};
    use geoquiz_core::random::fixed_seed;
    use geoquiz_core::time::{fixed_clock, fixed_now};

    fn build_country(i: usize) -> Country {
        Country::new(format!("Country {i}"), ["Europe", "Asia", "Africa"][i % 3])
            .with_capital(format!("Capital {i}"))
            .with_flag(format!("https://flags.example/{i}.png"))
            .with_population(1_000 * i as u64)
            .with_currency(Currency::new(format!("C{i}"), format!("Currency {i}"), "$"))
            .with_language(Language::new(format!("l{i}"), format!("Language {i}")))
    }

    fn build_pool() -> CountryPool {
        CountryPool::new((0..8).map(build_country)).unwrap()
    }

    fn build_session() -> QuizSession {
        QuizSession::start(build_pool(), QuizSettings::default(), fixed_clock(), fixed_seed())
            .unwrap()
    }

    fn wrong_option(session: &QuizSession) -> String {
        let question = session.current_question().unwrap();
        question
            .options()
            .iter()
            .find(|o| !question.is_correct(o))
            .cloned()
            .unwrap()
    }

    #[test]
    fn new_session_awaits_first_answer() {
        let session = build_session();
        let state = session.state();
        assert_eq!(state.question_index, 1);
        assert_eq!(state.total_questions, 10);
        assert_eq!(state.score, 0);
        assert!(state.current_question.is_some());
        assert!(!state.answered);
        assert_eq!(state.selected_option, None);
        assert_eq!(state.phase(), QuizPhase::AwaitingAnswer);
        assert_eq!(session.phase(), QuizPhase::AwaitingAnswer);
        assert_eq!(session.started_at(), fixed_now());
    }

    #[test]
    fn empty_pool_is_rejected() {
        let err = QuizSession::new(Vec::new()).unwrap_err();
        assert!(matches!(err, QuizError::Generator(GeneratorError::EmptyPool)));
    }

    #[test]
    fn correct_selection_scores_once() {
        let mut session = build_session();
        let correct = session.current_question().unwrap().correct_answer().to_owned();

        let outcome = session.select_option(&correct).unwrap();
        assert_eq!(
            outcome,
            SelectionOutcome::Recorded {
                correct: true,
                correct_answer: correct.clone(),
            }
        );
        assert_eq!(session.score(), 1);
        assert_eq!(session.phase(), QuizPhase::Answered);

        let again = session.select_option(&correct).unwrap();
        assert_eq!(again, SelectionOutcome::Ignored(IgnoredSelection::AlreadyAnswered));
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn selection_is_idempotent() {
        let mut session = build_session();
        let wrong = wrong_option(&session);
        let correct = session.current_question().unwrap().correct_answer().to_owned();

        session.select_option(&wrong).unwrap();
        session.select_option(&correct).unwrap();

        assert_eq!(session.score(), 0);
        assert_eq!(session.selected_option(), Some(wrong.as_str()));
        assert_eq!(session.turns().len(), 1);
    }

    #[test]
    fn unknown_option_is_ignored_by_default() {
        let mut session = build_session();
        let outcome = session.select_option("Atlantis").unwrap();
        assert_eq!(outcome, SelectionOutcome::Ignored(IgnoredSelection::NotAnOption));
        assert!(!session.is_answered());
        assert_eq!(session.selected_option(), None);
    }

    #[test]
    fn unknown_option_is_an_error_when_strict() {
        let settings = QuizSettings::new(10, 8, Category::ALL, true).unwrap();
        let mut session =
            QuizSession::start(build_pool(), settings, fixed_clock(), fixed_seed()).unwrap();
        let err = session.select_option("Atlantis").unwrap_err();
        assert!(matches!(err, QuizError::InvalidSelection { option } if option == "Atlantis"));
        assert!(!session.is_answered());
    }

    #[test]
    fn perfect_run_scores_every_question() {
        let mut session = build_session();
        for turn in 1..=10 {
            assert_eq!(session.question_index(), turn);
            let correct = session.current_question().unwrap().correct_answer().to_owned();
            session.select_option(&correct).unwrap();
            assert!(session.score() <= session.question_index());
            session.advance().unwrap();
        }

        assert!(session.is_complete());
        assert_eq!(session.phase(), QuizPhase::Completed);
        assert_eq!(session.score(), 10);
        assert!(session.current_question().is_none());

        let summary = session.summary().unwrap();
        assert_eq!(summary.score(), 10);
        assert_eq!(summary.answered(), 10);
        assert_eq!(summary.completed_at(), fixed_now());
    }

    #[test]
    fn completed_session_ignores_further_input() {
        let mut session = build_session();
        while !session.is_complete() {
            session.advance().unwrap();
        }
        assert_eq!(session.question_index(), 10);
        assert_eq!(session.advance().unwrap(), QuizPhase::Completed);
        assert_eq!(
            session.select_option("anything").unwrap(),
            SelectionOutcome::Ignored(IgnoredSelection::Completed)
        );
        assert_eq!(session.score(), 0);
        assert_eq!(session.state().current_question, None);
    }

    #[test]
    fn advancing_unanswered_records_a_skip() {
        let mut session = build_session();
        session.advance().unwrap();
        assert_eq!(session.turns().len(), 1);
        assert_eq!(session.turns()[0].selected, None);
        assert!(!session.turns()[0].correct);
        assert_eq!(session.question_index(), 2);
    }

    #[test]
    fn summary_requires_completion() {
        let session = build_session();
        assert!(matches!(session.summary(), Err(QuizError::NotCompleted)));
    }

    #[test]
    fn restart_resets_score_and_issues_a_question() {
        let mut session = build_session();
        for _ in 0..4 {
            let correct = session.current_question().unwrap().correct_answer().to_owned();
            session.select_option(&correct).unwrap();
            session.advance().unwrap();
        }
        assert_eq!(session.score(), 4);

        session.restart().unwrap();
        let state = session.state();
        assert_eq!(state.score, 0);
        assert_eq!(state.question_index, 1);
        assert!(state.current_question.is_some());
        assert!(!state.answered);
        assert!(session.turns().is_empty());
        assert!(!session.is_complete());
    }

    #[test]
    fn restart_after_completion_reopens_the_quiz() {
        let mut session = build_session();
        while !session.is_complete() {
            session.advance().unwrap();
        }
        session.restart().unwrap();
        assert_eq!(session.phase(), QuizPhase::AwaitingAnswer);
        assert_eq!(session.completed_at(), None);
    }

    #[test]
    fn unsatisfiable_category_surfaces_from_start() {
        let pool = CountryPool::new(vec![
            Country::new("A", "Europe"),
            Country::new("B", "Asia"),
        ])
        .unwrap();
        let settings = QuizSettings::new(10, 8, [Category::Capital], false).unwrap();
        let err = QuizSession::start(pool, settings, fixed_clock(), fixed_seed()).unwrap_err();
        assert!(matches!(
            err,
            QuizError::Generator(GeneratorError::UnsatisfiableCategory {
                category: Category::Capital
            })
        ));
    }

    fn regions_without_capitals() -> CountryPool {
        CountryPool::new(vec![
            Country::new("A", "Europe"),
            Country::new("B", "Asia"),
            Country::new("C", "Africa"),
            Country::new("D", "Oceania"),
        ])
        .unwrap()
    }

    fn mixed_settings() -> QuizSettings {
        QuizSettings::new(10, 8, [Category::Region, Category::Capital], false).unwrap()
    }

    /// Starts a session over a pool where only region questions succeed and plays
    /// until an `advance` fails.
    fn session_with_failed_advance() -> QuizSession {
        for seed in 0..64 {
            let Ok(mut session) = QuizSession::start(
                regions_without_capitals(),
                mixed_settings(),
                fixed_clock(),
                RandomSource::seeded(seed),
            ) else {
                continue;
            };
            let answer = session.current_question().unwrap().correct_answer().to_owned();
            session.select_option(&answer).unwrap();

            while !session.is_complete() {
                let before = session.state();
                let turns = session.turns().to_vec();
                match session.advance() {
                    Ok(_) => {}
                    Err(err) => {
                        assert!(matches!(
                            err,
                            QuizError::Generator(GeneratorError::UnsatisfiableCategory {
                                category: Category::Capital
                            })
                        ));
                        assert_eq!(session.state(), before);
                        assert_eq!(session.turns(), turns.as_slice());
                        return session;
                    }
                }
            }
        }
        panic!("no seed produced a failing advance");
    }

    #[test]
    fn failed_advance_leaves_session_unchanged() {
        let session = session_with_failed_advance();
        assert!(!session.is_complete());
        assert!(session.current_question().is_some());
    }

    #[test]
    fn failed_restart_leaves_session_unchanged() {
        let mut session = session_with_failed_advance();
        let mut failures = 0;
        for _ in 0..64 {
            let before = session.state();
            let turns = session.turns().to_vec();
            let started_at = session.started_at();
            if session.restart().is_err() {
                assert_eq!(session.state(), before);
                assert_eq!(session.turns(), turns.as_slice());
                assert_eq!(session.started_at(), started_at);
                failures += 1;
            }
        }
        assert!(failures > 0);
    }

    #[test]
    fn summary_serializes_timestamps() {
        let mut session = build_session();
        while !session.is_complete() {
            session.advance().unwrap();
        }
        let json = serde_json::to_value(session.summary().unwrap()).unwrap();
        assert!(json["started_at"].is_string());
        assert!(json["completed_at"].is_string());
        assert_eq!(json["score"], 0);
    }

    #[test]
    fn seeded_sessions_replay() {
        let a = build_session();
        let b = build_session();
        assert_eq!(a.current_question(), b.current_question());
    }

    #[test]
    fn progress_tracks_issued_questions() {
        let mut session = build_session();
        session.advance().unwrap();
        let progress = session.progress();
        assert_eq!(
            progress,
            QuizProgress {
                issued: 2,
                total: 10,
                remaining: 8,
                score: 0,
                is_complete: false,
            }
        );
    }
}
