// src/curriculum/skip_counting.rs

//! Counting by 2s, 5s and 10s.

use rand::{Rng, RngCore};

use super::{Strand, StrandGenerator, compose_question, pick};
use crate::models::question::{AnswerValue, Question};

pub struct SkipCountingStrand;

const STEPS: [i64; 3] = [2, 5, 10];

#[derive(Debug, Clone, Copy)]
enum Mode {
    NextNumber,
    FillGap,
    CountGroups,
}

const MODES: [Mode; 3] = [Mode::NextNumber, Mode::FillGap, Mode::CountGroups];

/// `len` terms counting up by `step` from `start`.
pub fn progression(start: i64, step: i64, len: usize) -> Vec<i64> {
    (0..len as i64).map(|i| start + step * i).collect()
}

/// Emoji and description for a group of `step` things.
fn group_of(step: i64) -> (&'static str, &'static str) {
    match step {
        2 => ("👟", "pairs of shoes"),
        5 => ("🖐️", "hands (5 fingers each)"),
        _ => ("🔟", "groups of 10"),
    }
}

impl StrandGenerator for SkipCountingStrand {
    fn strand(&self) -> Strand {
        Strand::SkipCounting
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Question {
        let step = *pick(&STEPS, rng);

        let (prompt, answer, distractors) = match *pick(&MODES, rng) {
            Mode::NextNumber => {
                let start = rng.random_range(0..=3) * step;
                let shown = progression(start, step, 4);
                let last = shown[shown.len() - 1];
                let display = shown
                    .iter()
                    .map(|n| n.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                let prompt = format!(
                    "Count by <b>{}s</b>. What comes next?<br><div style='font-size:1.8rem;margin:15px 0;'>{}, ?</div>",
                    step, display
                );
                (prompt, last + step, vec![last + 1, last + 2 * step])
            }
            Mode::FillGap => {
                let start = rng.random_range(0..=2) * step;
                let terms = progression(start, step, 5);
                let gap = rng.random_range(1..=3);
                let missing = terms[gap];
                let display = terms
                    .iter()
                    .enumerate()
                    .map(|(i, n)| if i == gap { "?".to_string() } else { n.to_string() })
                    .collect::<Vec<_>>()
                    .join(", ");
                let prompt = format!(
                    "Count by <b>{}s</b>. What is the missing number?<br><div style='font-size:1.8rem;margin:15px 0;'>{}</div>",
                    step, display
                );
                (prompt, missing, vec![missing + 1, missing - 1])
            }
            Mode::CountGroups => {
                let count: i64 = rng.random_range(3..=6);
                let (emoji, groups) = group_of(step);
                let total = count * step;
                let prompt = format!(
                    "Count by <b>{}s</b>. How many in total?<br><div style='font-size:2rem;margin:15px 0;'>{}</div><p>{} {}</p>",
                    step,
                    emoji.repeat(count as usize),
                    count,
                    groups
                );
                let below = if total > step { total - step } else { total + 2 * step };
                (prompt, total, vec![total + step, below])
            }
        };

        compose_question(
            Strand::SkipCounting,
            prompt,
            AnswerValue::Text(answer.to_string()),
            distractors
                .into_iter()
                .map(|n: i64| AnswerValue::Text(n.to_string())),
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
    fn progression_counts_by_step() {
        assert_eq!(progression(10, 5, 4), vec![10, 15, 20, 25]);
        assert_eq!(progression(0, 2, 5), vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn answers_are_multiples_of_the_step() {
        let mut rng = StdRng::seed_from_u64(81);
        for _ in 0..SWEEP {
            let q = SkipCountingStrand.generate(&mut rng);
            assert_well_formed(&q);

            let step: i64 = q
                .prompt
                .trim_start_matches("Count by <b>")
                .split('s')
                .next()
                .unwrap()
                .parse()
                .unwrap();
            assert!(STEPS.contains(&step));
            let answer: i64 = q.correct_answer.canonical().parse().unwrap();
            assert_eq!(answer % step, 0);
            assert!(answer > 0);
        }
    }
}
