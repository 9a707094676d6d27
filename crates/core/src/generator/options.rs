use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::OPTION_COUNT;

/// Answer options being collected for one question, correct answer first.
#[derive(Debug, Clone)]
pub(crate) struct OptionSet {
    values: Vec<String>,
}

impl OptionSet {
    pub(crate) fn seeded(correct: String) -> Self {
        let mut values = Vec::with_capacity(OPTION_COUNT);
        values.push(correct);
        Self { values }
    }

    pub(crate) fn len(&self) -> usize {
        self.values.len()
    }

    pub(crate) fn is_full(&self) -> bool {
        self.values.len() >= OPTION_COUNT
    }

    /// Adds `candidate` if it is non-empty, not yet present and there is room.
    ///
    /// Presence is exact, case-sensitive string equality.
    pub(crate) fn offer(&mut self, candidate: Option<String>) -> bool {
        let Some(candidate) = candidate else {
            return false;
        };
        if self.is_full() || candidate.trim().is_empty() || self.values.contains(&candidate) {
            return false;
        }
        self.values.push(candidate);
        true
    }

    /// Tops the set up from `pool` in random order.
    pub(crate) fn fill_from<R: Rng + ?Sized>(&mut self, pool: &[String], rng: &mut R) {
        let mut candidates: Vec<&String> = pool.iter().collect();
        candidates.shuffle(rng);
        for candidate in candidates {
            if self.is_full() {
                break;
            }
            self.offer(Some(candidate.clone()));
        }
    }

    /// Consumes the set, returning its values in a uniformly random order.
    pub(crate) fn into_shuffled<R: Rng + ?Sized>(mut self, rng: &mut R) -> Vec<String> {
        self.values.shuffle(rng);
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::fixed_seed;

    #[test]
    fn offer_rejects_blank_duplicate_and_overflow() {
        let mut set = OptionSet::seeded("Paris".into());
        assert!(!set.offer(None));
        assert!(!set.offer(Some(String::new())));
        assert!(!set.offer(Some("Paris".into())));
        assert!(set.offer(Some("paris".into())));
        assert!(set.offer(Some("Rome".into())));
        assert!(set.offer(Some("Madrid".into())));
        assert!(set.is_full());
        assert!(!set.offer(Some("Lisbon".into())));
        assert_eq!(set.len(), OPTION_COUNT);
    }

    #[test]
    fn fill_from_stops_when_full() {
        let mut rng = fixed_seed().rng();
        let mut set = OptionSet::seeded("A".into());
        let pool: Vec<String> = ["A", "B", "C", "D", "E", "F"].map(String::from).to_vec();
        set.fill_from(&pool, &mut rng);
        assert!(set.is_full());
        let values = set.into_shuffled(&mut rng);
        assert!(values.contains(&"A".to_string()));
    }

    #[test]
    fn fill_from_short_pool_leaves_gap() {
        let mut rng = fixed_seed().rng();
        let mut set = OptionSet::seeded("A".into());
        let pool: Vec<String> = ["A", "B", "C"].map(String::from).to_vec();
        set.fill_from(&pool, &mut rng);
        assert_eq!(set.len(), 3);
        assert!(!set.is_full());
    }
}
