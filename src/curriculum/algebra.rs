// src/curriculum/algebra.rs

//! Patterns, growing/shrinking sequences and simple equalities.

use rand::{Rng, RngCore};

use super::{Strand, StrandGenerator, compose_question, lower_or_raise, pick};
use crate::models::question::{AnswerValue, Question};

pub struct AlgebraStrand;

#[derive(Debug, Clone, Copy)]
enum Mode {
    PatternAb,
    PatternAab,
    PatternAbc,
    Growing,
    Shrinking,
    MissingNumber,
    Equality,
}

const MODES: [Mode; 7] = [
    Mode::PatternAb,
    Mode::PatternAab,
    Mode::PatternAbc,
    Mode::Growing,
    Mode::Shrinking,
    Mode::MissingNumber,
    Mode::Equality,
];

/// A visual pattern: shown elements, the next element, and its candidates.
struct Pattern {
    shown: &'static [&'static str],
    next: &'static str,
    choices: [&'static str; 3],
}

const AB_PATTERNS: &[Pattern] = &[
    Pattern { shown: &["🔴", "🔵", "🔴", "🔵", "🔴"], next: "🔵", choices: ["🔴", "🔵", "🟢"] },
    Pattern { shown: &["🌙", "⭐", "🌙", "⭐", "🌙"], next: "⭐", choices: ["🌙", "⭐", "🌟"] },
    Pattern { shown: &["🐱", "🐶", "🐱", "🐶", "🐱"], next: "🐶", choices: ["🐱", "🐶", "🐰"] },
    Pattern { shown: &["▲", "■", "▲", "■", "▲"], next: "■", choices: ["▲", "■", "●"] },
    Pattern { shown: &["1", "2", "1", "2", "1"], next: "2", choices: ["1", "2", "3"] },
];

const AAB_PATTERNS: &[Pattern] = &[
    Pattern { shown: &["🔴", "🔴", "🔵", "🔴", "🔴", "🔵", "🔴", "🔴"], next: "🔵", choices: ["🔴", "🔵", "🟢"] },
    Pattern { shown: &["👏", "👏", "🙌", "👏", "👏", "🙌", "👏", "👏"], next: "🙌", choices: ["👏", "🙌", "✋"] },
    Pattern { shown: &["🍎", "🍎", "🍊", "🍎", "🍎", "🍊", "🍎", "🍎"], next: "🍊", choices: ["🍎", "🍊", "🍌"] },
];

const ABC_PATTERNS: &[Pattern] = &[
    Pattern { shown: &["🔴", "🔵", "🟢", "🔴", "🔵", "🟢", "🔴", "🔵"], next: "🟢", choices: ["🔴", "🔵", "🟢"] },
    Pattern { shown: &["🍎", "🍊", "🍌", "🍎", "🍊", "🍌", "🍎", "🍊"], next: "🍌", choices: ["🍎", "🍊", "🍌"] },
    Pattern { shown: &["A", "B", "C", "A", "B", "C", "A", "B"], next: "C", choices: ["A", "B", "C"] },
];

/// A number sequence with its next term and curated wrong terms.
struct Sequence {
    shown: [i64; 4],
    next: i64,
    wrong: [i64; 2],
}

const GROWING: &[Sequence] = &[
    Sequence { shown: [1, 2, 3, 4], next: 5, wrong: [6, 4] },
    Sequence { shown: [2, 4, 6, 8], next: 10, wrong: [9, 12] },
    Sequence { shown: [5, 10, 15, 20], next: 25, wrong: [22, 30] },
    Sequence { shown: [1, 3, 5, 7], next: 9, wrong: [8, 11] },
];

const SHRINKING: &[Sequence] = &[
    Sequence { shown: [10, 9, 8, 7], next: 6, wrong: [5, 8] },
    Sequence { shown: [20, 18, 16, 14], next: 12, wrong: [10, 13] },
    Sequence { shown: [15, 12, 9, 6], next: 3, wrong: [4, 0] },
];

impl StrandGenerator for AlgebraStrand {
    fn strand(&self) -> Strand {
        Strand::Algebra
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Question {
        let Draft { prompt, answer, distractors } = match *pick(&MODES, rng) {
            Mode::PatternAb => pattern_question(pick(AB_PATTERNS, rng), "2rem"),
            Mode::PatternAab => pattern_question(pick(AAB_PATTERNS, rng), "1.8rem"),
            Mode::PatternAbc => pattern_question(pick(ABC_PATTERNS, rng), "1.8rem"),
            Mode::Growing => sequence_question(pick(GROWING, rng), "What number comes next?"),
            Mode::Shrinking => sequence_question(
                pick(SHRINKING, rng),
                "The numbers are getting <b>smaller</b>. What comes next?",
            ),
            Mode::MissingNumber => {
                let a: i64 = rng.random_range(1..=9);
                let b: i64 = rng.random_range(1..=9);
                let prompt = format!(
                    "Find the missing number:<br><div style='font-size:2.5rem;margin:15px 0;'>{} + <b>?</b> = {}</div>",
                    a,
                    a + b
                );
                numeric_draft(prompt, b)
            }
            Mode::Equality => {
                let a: i64 = rng.random_range(2..=8);
                let b: i64 = rng.random_range(1..a);
                let c = a - b;
                let prompt = format!(
                    "Make both sides <b>equal</b>:<br><div style='font-size:2rem;margin:15px 0;'>{} = {} + <b>?</b></div>",
                    a, b
                );
                numeric_draft(prompt, c)
            }
        };

        compose_question(Strand::Algebra, prompt, answer, distractors, rng)
    }
}

/// Intermediate result before option assembly.
struct Draft {
    prompt: String,
    answer: AnswerValue,
    distractors: Vec<AnswerValue>,
}

fn numeric_draft(prompt: String, answer: i64) -> Draft {
    Draft {
        prompt,
        answer: AnswerValue::Text(answer.to_string()),
        distractors: neighbours(answer),
    }
}

fn pattern_question(pattern: &Pattern, font_size: &str) -> Draft {
    let display = format!("{} <b>?</b>", pattern.shown.join(" "));
    Draft {
        prompt: format!(
            "What comes next in the pattern?<br><div style='font-size:{};margin:15px 0;'>{}</div>",
            font_size, display
        ),
        answer: pattern.next.into(),
        distractors: pattern.choices.iter().map(|c| AnswerValue::from(*c)).collect(),
    }
}

fn sequence_question(sequence: &Sequence, lead: &str) -> Draft {
    let display = sequence
        .shown
        .iter()
        .map(|n| n.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    Draft {
        prompt: format!(
            "{}<br><div style='font-size:2rem;margin:15px 0;'>{}, <b>?</b></div>",
            lead, display
        ),
        answer: AnswerValue::Text(sequence.next.to_string()),
        distractors: sequence
            .wrong
            .iter()
            .map(|n| AnswerValue::Text(n.to_string()))
            .collect(),
    }
}

/// One above, and one below guarded against dropping to zero.
fn neighbours(value: i64) -> Vec<AnswerValue> {
    vec![
        AnswerValue::Text((value + 1).to_string()),
        AnswerValue::Text(lower_or_raise(value, 1).to_string()),
    ]
}
