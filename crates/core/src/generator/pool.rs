use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

use super::GeneratorError;
use super::facts;
use crate::model::{Category, Country, OPTION_COUNT, Region};

/// Read-only country collection with per-category lookups computed once at load.
///
/// For every category the pool keeps the indices of countries that can be a
/// question subject and the distinct answer values available as distractors, so
/// "can this category be asked at all" is a table lookup instead of a sampling loop.
#[derive(Debug, Clone)]
pub struct CountryPool {
    countries: Vec<Country>,
    subjects: [Vec<usize>; 6],
    distinct_facts: [Vec<String>; 6],
}

impl CountryPool {
    /// Builds a pool, dropping records without a name or region.
    ///
    /// # Errors
    ///
    /// Returns `GeneratorError::EmptyPool` if no usable country remains.
    pub fn new(countries: impl IntoIterator<Item = Country>) -> Result<Self, GeneratorError> {
        let mut dropped = 0_usize;
        let countries: Vec<Country> = countries
            .into_iter()
            .filter(|c| {
                let keep = c.is_quizzable();
                if !keep {
                    dropped += 1;
                }
                keep
            })
            .collect();

        if dropped > 0 {
            debug!(dropped, "dropped countries without a name or region");
        }
        if countries.is_empty() {
            return Err(GeneratorError::EmptyPool);
        }

        let subjects = Category::ALL.map(|category| {
            countries
                .iter()
                .enumerate()
                .filter(|(_, c)| facts::is_subject(category, c))
                .map(|(i, _)| i)
                .collect::<Vec<_>>()
        });

        let distinct_facts = Category::ALL.map(|category| match category {
            Category::Region => Region::ALL
                .iter()
                .map(|r| r.as_str().to_owned())
                .collect::<Vec<String>>(),
            _ => {
                let mut seen = HashSet::new();
                countries
                    .iter()
                    .filter_map(|c| facts::fact(category, c))
                    .filter(|v| seen.insert(v.clone()))
                    .collect::<Vec<String>>()
            }
        });

        debug!(countries = countries.len(), "country pool ready");

        Ok(Self {
            countries,
            subjects,
            distinct_facts,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    /// Always false for a constructed pool; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    #[must_use]
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    /// Indices of countries that can anchor a question of `category`.
    #[must_use]
    pub fn subjects(&self, category: Category) -> &[usize] {
        &self.subjects[category.index()]
    }

    /// Distinct answer values that can appear as options for `category`.
    #[must_use]
    pub fn distinct_facts(&self, category: Category) -> &[String] {
        &self.distinct_facts[category.index()]
    }

    /// Checks that a question of `category` can be generated from this pool.
    ///
    /// # Errors
    ///
    /// Returns `UnsatisfiableCategory` when no country qualifies as subject and
    /// `DistractorExhaustion` when fewer than four distinct answers exist.
    pub fn check(&self, category: Category) -> Result<(), GeneratorError> {
        if self.subjects(category).is_empty() {
            return Err(GeneratorError::UnsatisfiableCategory { category });
        }
        let distinct = self.distinct_facts(category).len();
        if distinct < OPTION_COUNT {
            return Err(GeneratorError::DistractorExhaustion {
                category,
                distinct,
                required: OPTION_COUNT,
            });
        }
        Ok(())
    }

    /// Categories this pool can generate questions for.
    #[must_use]
    pub fn supported_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|c| self.check(*c).is_ok())
            .collect()
    }

    pub(crate) fn random_country<R: Rng + ?Sized>(&self, rng: &mut R) -> &Country {
        &self.countries[rng.random_range(0..self.countries.len())]
    }

    pub(crate) fn random_subject<R: Rng + ?Sized>(
        &self,
        category: Category,
        rng: &mut R,
    ) -> Result<&Country, GeneratorError> {
        let subjects = self.subjects(category);
        if subjects.is_empty() {
            return Err(GeneratorError::UnsatisfiableCategory { category });
        }
        let index = subjects[rng.random_range(0..subjects.len())];
        Ok(&self.countries[index])
    }
}
