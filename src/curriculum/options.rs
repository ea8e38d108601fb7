// src/curriculum/options.rs

use std::collections::HashSet;

use rand::{Rng, RngCore, seq::SliceRandom};

use super::Strand;
use crate::models::question::{AnswerValue, Question};

/// Builds the option list shared by every strand.
///
/// The answer goes in first, distractors follow and are dropped when their
/// canonical form was already seen, then the list is shuffled. The answer
/// therefore appears exactly once whatever the distractors collide with.
pub fn assemble_options<I>(answer: &AnswerValue, distractors: I, rng: &mut dyn RngCore) -> Vec<AnswerValue>
where
    I: IntoIterator<Item = AnswerValue>,
{
    let mut seen = HashSet::new();
    seen.insert(answer.canonical());

    let mut options = vec![answer.clone()];
    for distractor in distractors {
        if seen.insert(distractor.canonical()) {
            options.push(distractor);
        }
    }

    options.shuffle(rng);
    options
}

/// Wraps generated content into a [`Question`] for `strand`.
pub fn compose_question<I>(
    strand: Strand,
    prompt: String,
    answer: AnswerValue,
    distractors: I,
    rng: &mut dyn RngCore,
) -> Question
where
    I: IntoIterator<Item = AnswerValue>,
{
    let options = assemble_options(&answer, distractors, rng);
    Question {
        prompt,
        correct_answer: answer,
        options,
        strand_label: strand.label().to_string(),
        kind: strand.key().to_string(),
    }
}

/// `value - offset` when that stays positive, `value + offset + 1` otherwise.
pub fn lower_or_raise(value: i64, offset: i64) -> i64 {
    if value - offset > 0 {
        value - offset
    } else {
        value + offset + 1
    }
}

/// Uniform pick from a non-empty pool.
pub fn pick<'a, T>(pool: &'a [T], rng: &mut dyn RngCore) -> &'a T {
    &pool[rng.random_range(0..pool.len())]
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn drops_distractors_equal_to_the_answer() {
        let mut rng = StdRng::seed_from_u64(1);
        let options = assemble_options(
            &AnswerValue::Number(4),
            vec![AnswerValue::Number(4), AnswerValue::from("4"), AnswerValue::Number(5)],
            &mut rng,
        );
        assert_eq!(options.len(), 2);
        assert!(options.contains(&AnswerValue::Number(4)));
        assert!(options.contains(&AnswerValue::Number(5)));
    }

    #[test]
    fn drops_duplicate_distractors() {
        let mut rng = StdRng::seed_from_u64(2);
        let options = assemble_options(
            &AnswerValue::from("Dime"),
            vec!["Nickel".into(), "Nickel".into(), "Quarter".into()],
            &mut rng,
        );
        assert_eq!(options.len(), 3);
    }

    #[test]
    fn lower_or_raise_never_goes_non_positive() {
        assert_eq!(lower_or_raise(5, 1), 4);
        assert_eq!(lower_or_raise(1, 1), 3);
        assert_eq!(lower_or_raise(0, 3), 4);
        assert_eq!(lower_or_raise(3, 3), 7);
        for value in 0..20 {
            for offset in 1..6 {
                assert!(lower_or_raise(value, offset) > 0);
                assert_ne!(lower_or_raise(value, offset), value);
            }
        }
    }

    #[test]
    fn pick_stays_in_the_pool() {
        let mut rng = StdRng::seed_from_u64(3);
        let pool = [1, 2, 3];
        for _ in 0..50 {
            assert!(pool.contains(pick(&pool, &mut rng)));
        }
    }
}
