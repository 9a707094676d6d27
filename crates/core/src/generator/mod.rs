//! Multiple-choice question generation over a country pool.

mod facts;
mod options;
mod pool;

use rand::Rng;
use thiserror::Error;
use tracing::{debug, trace};

use crate::model::{Category, OPTION_COUNT, Question, QuestionError, Region};
use options::OptionSet;

pub use pool::CountryPool;

/// Random distractor draws allowed per pooled country before falling back.
pub const DEFAULT_ATTEMPTS_PER_COUNTRY: usize = 8;

/// Lower bound on distractor draws for very small pools.
const MIN_DRAWS: usize = 64;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GeneratorError {
    #[error("country pool is empty")]
    EmptyPool,

    #[error("no country in the pool has a {category} to ask about")]
    UnsatisfiableCategory { category: Category },

    #[error("only {distinct} distinct {category} answers in the pool, {required} are needed")]
    DistractorExhaustion {
        category: Category,
        distinct: usize,
        required: usize,
    },

    #[error(transparent)]
    Question(#[from] QuestionError),
}

//
// ─── GENERATOR ────────────────────────────────────────────────────────────────
//

/// Produces single questions from a borrowed [`CountryPool`].
///
/// The generator holds no randomness of its own; every call takes the RNG to use,
/// so a seeded RNG yields a reproducible question sequence.
#[derive(Debug, Clone, Copy)]
pub struct QuestionGenerator<'a> {
    pool: &'a CountryPool,
    attempts_per_country: usize,
}

impl<'a> QuestionGenerator<'a> {
    #[must_use]
    pub fn new(pool: &'a CountryPool) -> Self {
        Self {
            pool,
            attempts_per_country: DEFAULT_ATTEMPTS_PER_COUNTRY,
        }
    }

    /// Sets how many random distractor draws each pooled country is worth.
    #[must_use]
    pub fn with_attempts_per_country(mut self, attempts: usize) -> Self {
        self.attempts_per_country = attempts.max(1);
        self
    }

    /// Upper bound on random distractor draws for one question.
    #[must_use]
    pub fn max_draws(&self) -> usize {
        self.pool
            .len()
            .saturating_mul(self.attempts_per_country)
            .max(MIN_DRAWS)
    }

    /// Generates one question of `category`.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::UnsatisfiableCategory` if no country can be the
    /// subject, and `GeneratorError::DistractorExhaustion` if the pool holds fewer
    /// than four distinct answers for the category.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        category: Category,
        rng: &mut R,
    ) -> Result<Question, GeneratorError> {
        self.pool.check(category)?;

        let subject = self.pool.random_subject(category, rng)?;
        let correct = facts::fact(category, subject)
            .ok_or(GeneratorError::UnsatisfiableCategory { category })?;
        let prompt = facts::prompt(category, subject);
        let image_url = match category {
            Category::Flag => Some(subject.flag_image_url().to_owned()),
            _ => None,
        };

        trace!(%category, subject = subject.name(), "subject selected");

        let options = self.collect_options(category, correct.clone(), rng)?;
        Ok(Question::new(category, prompt, image_url, options, correct)?)
    }

    fn collect_options<R: Rng + ?Sized>(
        &self,
        category: Category,
        correct: String,
        rng: &mut R,
    ) -> Result<Vec<String>, GeneratorError> {
        let mut options = OptionSet::seeded(correct);
        let max_draws = self.max_draws();
        let mut draws = 0_usize;

        while !options.is_full() && draws < max_draws {
            draws += 1;
            options.offer(self.draw_distractor(category, rng));
        }

        if !options.is_full() {
            debug!(
                %category,
                draws,
                "distractor draws exhausted, filling from distinct answers"
            );
            options.fill_from(self.pool.distinct_facts(category), rng);
        }

        if !options.is_full() {
            return Err(GeneratorError::DistractorExhaustion {
                category,
                distinct: options.len(),
                required: OPTION_COUNT,
            });
        }

        Ok(options.into_shuffled(rng))
    }

    fn draw_distractor<R: Rng + ?Sized>(&self, category: Category, rng: &mut R) -> Option<String> {
        match category {
            Category::Region => {
                let region = Region::ALL[rng.random_range(0..Region::ALL.len())];
                Some(region.as_str().to_owned())
            }
            _ => facts::fact(category, self.pool.random_country(rng)),
        }
    }
}

/// Generates one question of `category` with default draw limits.
///
/// # Errors
///
/// See [`QuestionGenerator::generate`].
pub fn generate<R: Rng + ?Sized>(
    pool: &CountryPool,
    category: Category,
    rng: &mut R,
) -> Result<Question, GeneratorError> {
    QuestionGenerator::new(pool).generate(category, rng)
}
