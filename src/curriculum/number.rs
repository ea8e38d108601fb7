// src/curriculum/number.rs

//! Addition and subtraction to 50.

use rand::{Rng, RngCore};

use super::{Strand, StrandGenerator, compose_question, lower_or_raise, pick};
use crate::models::question::{AnswerValue, Question};

const COUNTERS: [&str; 4] = ["🍎", "⭐", "🐸", "🍪"];

/// Operands at or below this get an emoji counting aid.
const VISUAL_AID_LIMIT: i64 = 10;

pub struct NumberStrand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Subtract,
}

impl Operation {
    fn symbol(self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Subtract => '-',
        }
    }
}

impl StrandGenerator for NumberStrand {
    fn strand(&self) -> Strand {
        Strand::Number
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Question {
        let op = *pick(&[Operation::Add, Operation::Subtract], rng);

        let (a, b, answer, max_offset): (i64, i64, i64, i64) = match op {
            Operation::Add => {
                let a = rng.random_range(1..=25);
                let b = rng.random_range(1..=25);
                (a, b, a + b, 3)
            }
            Operation::Subtract => {
                let a = rng.random_range(10..=50);
                let b = rng.random_range(1..=a);
                (a, b, a - b, 5)
            }
        };

        let mut prompt = format!("What is {} {} {}?", a, op.symbol(), b);
        if a <= VISUAL_AID_LIMIT && b <= VISUAL_AID_LIMIT {
            let counter = pick(&COUNTERS, rng);
            prompt.push_str(&format!(
                "<br><span style='font-size:2rem'>{} &nbsp;{}&nbsp; {}</span>",
                repeat_counter(counter, a),
                op.symbol(),
                repeat_counter(counter, b),
            ));
        }

        let above = answer + rng.random_range(1..=max_offset);
        let below = lower_or_raise(answer, rng.random_range(1..=max_offset));

        compose_question(
            Strand::Number,
            prompt,
            AnswerValue::Number(answer),
            [AnswerValue::Number(above), AnswerValue::Number(below)],
            rng,
        )
    }
}

fn repeat_counter(counter: &str, count: i64) -> String {
    vec![counter; count as usize].join(" ")
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::curriculum::testing::{SWEEP, assert_well_formed};
    use crate::models::question::AnswerValue;

    fn operands(prompt: &str) -> (i64, char, i64) {
        let expr = prompt
            .trim_start_matches("What is ")
            .split('?')
            .next()
            .unwrap();
        let parts: Vec<&str> = expr.split_whitespace().collect();
        (
            parts[0].parse().unwrap(),
            parts[1].chars().next().unwrap(),
            parts[2].parse().unwrap(),
        )
    }

    #[test]
    fn answers_are_sums_or_differences_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..SWEEP {
            let q = NumberStrand.generate(&mut rng);
            assert_well_formed(&q);

            let (a, op, b) = operands(&q.prompt);
            let expected = match op {
                '+' => {
                    assert!((1..=25).contains(&a) && (1..=25).contains(&b));
                    a + b
                }
                '-' => {
                    assert!((10..=50).contains(&a) && (1..=a).contains(&b));
                    a - b
                }
                other => panic!("unexpected operator {other}"),
            };
            assert_eq!(q.correct_answer, AnswerValue::Number(expected));
        }
    }

    #[test]
    fn distractors_stay_positive() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..SWEEP {
            let q = NumberStrand.generate(&mut rng);
            for option in q.options.iter().filter(|o| **o != q.correct_answer) {
                match option {
                    AnswerValue::Number(n) => assert!(*n > 0),
                    other => panic!("non-numeric option {other:?}"),
                }
            }
        }
    }

    #[test]
    fn small_operands_get_counters() {
        let mut rng = StdRng::seed_from_u64(13);
        let q = (0..SWEEP)
            .map(|_| NumberStrand.generate(&mut rng))
            .find(|q| {
                let (a, _, b) = operands(&q.prompt);
                a <= VISUAL_AID_LIMIT && b <= VISUAL_AID_LIMIT
            })
            .expect("a small addition within the sweep");
        assert!(q.prompt.contains("<span"));
    }
}
