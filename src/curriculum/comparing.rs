// src/curriculum/comparing.rs

//! Greater than, less than, equal.

use std::cmp::Ordering;

use rand::{Rng, RngCore};

use super::{Strand, StrandGenerator, compose_question, pick};
use crate::models::question::{AnswerValue, Question};

pub struct ComparingStrand;

#[derive(Debug, Clone, Copy)]
enum Mode {
    Greater,
    FillSymbol,
    NumberLine,
}

const MODES: [Mode; 3] = [Mode::Greater, Mode::FillSymbol, Mode::NumberLine];

const EQUAL_SENTINEL: &str = "They are equal";
const SYMBOLS: [&str; 3] = [">", "<", "="];

/// Relational symbol that makes `a _ b` true.
pub fn relation_symbol(a: i64, b: i64) -> &'static str {
    match a.cmp(&b) {
        Ordering::Greater => ">",
        Ordering::Less => "<",
        Ordering::Equal => "=",
    }
}

impl StrandGenerator for ComparingStrand {
    fn strand(&self) -> Strand {
        Strand::Comparing
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Question {
        let (prompt, answer, distractors): (String, String, Vec<String>) = match *pick(&MODES, rng) {
            Mode::Greater => {
                let a: i64 = rng.random_range(1..=50);
                let mut b: i64 = rng.random_range(1..=49);
                if b >= a {
                    b += 1;
                }
                let prompt = format!(
                    "Which number is <b>greater</b>?<br><div style='font-size:2.5rem;margin:15px 0;'>{} &nbsp;&nbsp; or &nbsp;&nbsp; {}</div>",
                    a, b
                );
                (
                    prompt,
                    a.max(b).to_string(),
                    vec![a.min(b).to_string(), EQUAL_SENTINEL.to_string()],
                )
            }
            Mode::FillSymbol => {
                let a: i64 = rng.random_range(1..=30);
                let b: i64 = rng.random_range(1..=30);
                let prompt = format!(
                    "Fill in the blank:<br><div style='font-size:2.5rem;margin:15px 0;'>{} &nbsp; ⬜ &nbsp; {}</div><p>Choose the correct symbol:</p>",
                    a, b
                );
                (
                    prompt,
                    relation_symbol(a, b).to_string(),
                    SYMBOLS.iter().map(|s| s.to_string()).collect(),
                )
            }
            Mode::NumberLine => {
                let target: i64 = rng.random_range(5..=15);
                let ticks = (target - 3..=target + 3)
                    .map(|n| {
                        if n == target {
                            format!("<b>{}</b>", n)
                        } else {
                            n.to_string()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(" ─ ");
                let prompt = format!(
                    "Look at the number line. Which number is <b>greater than {}</b>?<br><div style='margin:15px 0;font-family:monospace;'>◀─ {} ─▶</div>",
                    target, ticks
                );
                let answer = target + rng.random_range(1..=3);
                let below = target - rng.random_range(1..=2);
                (
                    prompt,
                    answer.to_string(),
                    vec![below.to_string(), target.to_string()],
                )
            }
        };

        compose_question(
            Strand::Comparing,
            prompt,
            AnswerValue::Text(answer),
            distractors.into_iter().map(AnswerValue::Text),
            rng,
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::curriculum::testing::{SWEEP, assert_well_formed};

    #[test]
    fn relation_symbol_covers_all_orderings() {
        assert_eq!(relation_symbol(7, 3), ">");
        assert_eq!(relation_symbol(3, 7), "<");
        assert_eq!(relation_symbol(5, 5), "=");
    }

    #[test]
    fn sweep_is_well_formed() {
        let mut rng = StdRng::seed_from_u64(71);
        for _ in 0..SWEEP {
            let q = ComparingStrand.generate(&mut rng);
            assert_well_formed(&q);
            assert_eq!(q.options.len(), 3);
        }
    }

    #[test]
    fn number_line_answer_exceeds_target() {
        let mut rng = StdRng::seed_from_u64(72);
        for _ in 0..SWEEP {
            let q = ComparingStrand.generate(&mut rng);
            let Some(rest) = q.prompt.strip_prefix("Look at the number line. Which number is <b>greater than ") else {
                continue;
            };
            let target: i64 = rest.split('<').next().unwrap().parse().unwrap();
            let answer: i64 = q.correct_answer.canonical().parse().unwrap();
            assert!((target + 1..=target + 3).contains(&answer));
            assert!((5..=15).contains(&target));
        }
    }
}
