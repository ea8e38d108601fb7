// src/curriculum/measurement.rs

//! Comparing lengths and measuring with non-standard units.

use rand::{Rng, RngCore};

use super::{Strand, StrandGenerator, compose_question, pick};
use crate::models::question::{AnswerValue, Question};

pub struct MeasurementStrand;

#[derive(Debug, Clone, Copy)]
enum Mode {
    Compare,
    CountUnits,
    Order,
}

const MODES: [Mode; 3] = [Mode::Compare, Mode::CountUnits, Mode::Order];

struct Item {
    name: &'static str,
    length: usize,
    icon: &'static str,
}

/// Lengths are pairwise distinct so a comparison always has a winner.
const ITEMS: &[Item] = &[
    Item { name: "Pencil", length: 5, icon: "✏️" },
    Item { name: "Crayon", length: 3, icon: "🖍️" },
    Item { name: "Marker", length: 6, icon: "🖊️" },
    Item { name: "Eraser", length: 2, icon: "🧽" },
    Item { name: "Book", length: 8, icon: "📕" },
];

const SAME_LENGTH: &str = "They are the same";

const UNIT_ICONS: [&str; 3] = ["📎", "🧱", "📏"];

const ORDER_PROMPT: &str =
    "Put these in order from <b>shortest to longest</b>:<br><br>🐜 Ant, 🐱 Cat, 🐘 Elephant";
const ORDER_ANSWER: &str = "Ant, Cat, Elephant";
const ORDER_WRONG: [&str; 2] = ["Elephant, Cat, Ant", "Cat, Ant, Elephant"];

impl StrandGenerator for MeasurementStrand {
    fn strand(&self) -> Strand {
        Strand::Measurement
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Question {
        let (prompt, answer, distractors): (String, AnswerValue, Vec<AnswerValue>) =
            match *pick(&MODES, rng) {
                Mode::Compare => {
                    let first = rng.random_range(0..ITEMS.len());
                    let mut second = rng.random_range(0..ITEMS.len() - 1);
                    if second >= first {
                        second += 1;
                    }
                    let (a, b) = (&ITEMS[first], &ITEMS[second]);
                    let longer = if a.length > b.length { a } else { b };
                    let shorter = if a.length > b.length { b } else { a };

                    let prompt = format!(
                        "Which is <b>longer</b>?<br><div style='text-align:left;margin:15px;font-family:monospace;'>{}{}</div>",
                        bar_row(a, "#3498db"),
                        bar_row(b, "#e74c3c")
                    );
                    (
                        prompt,
                        longer.name.into(),
                        vec![shorter.name.into(), SAME_LENGTH.into()],
                    )
                }
                Mode::CountUnits => {
                    let units: i64 = rng.random_range(3..=7);
                    let icon = pick(&UNIT_ICONS, rng);
                    let prompt = format!(
                        "How many {} long is this line?<br><div style='margin:15px 0;font-size:1.5rem;'>{}</div><div style='font-size:1.3rem;'>{}</div>",
                        icon,
                        "━".repeat(units as usize * 2),
                        icon.repeat(units as usize)
                    );
                    (
                        prompt,
                        AnswerValue::Text(units.to_string()),
                        vec![
                            AnswerValue::Text((units + 1).to_string()),
                            AnswerValue::Text((units - 1).to_string()),
                        ],
                    )
                }
                Mode::Order => (
                    ORDER_PROMPT.to_string(),
                    ORDER_ANSWER.into(),
                    ORDER_WRONG.iter().map(|o| AnswerValue::from(*o)).collect(),
                ),
            };

        compose_question(Strand::Measurement, prompt, answer, distractors, rng)
    }
}

fn bar_row(item: &Item, colour: &str) -> String {
    format!(
        "<div>{} {}: <span style='color:{}'>{}</span></div>",
        item.icon,
        item.name,
        colour,
        "█".repeat(item.length)
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::curriculum::testing::{SWEEP, assert_well_formed};

    #[test]
    fn item_lengths_are_distinct() {
        let lengths: HashSet<usize> = ITEMS.iter().map(|i| i.length).collect();
        assert_eq!(lengths.len(), ITEMS.len());
    }

    #[test]
    fn compare_picks_the_longer_item() {
        let mut rng = StdRng::seed_from_u64(51);
        let mut seen = 0;
        for _ in 0..SWEEP {
            let q = MeasurementStrand.generate(&mut rng);
            assert_well_formed(&q);
            if !q.prompt.starts_with("Which is <b>longer</b>") {
                continue;
            }
            seen += 1;
            assert!(q.options.contains(&SAME_LENGTH.into()));
            let shown: Vec<&Item> = ITEMS
                .iter()
                .filter(|i| q.prompt.contains(&format!(" {}: ", i.name)))
                .collect();
            assert_eq!(shown.len(), 2);
            let longest = shown.iter().max_by_key(|i| i.length).unwrap();
            assert_eq!(q.correct_answer, AnswerValue::from(longest.name));
        }
        assert!(seen > 0);
    }

    #[test]
    fn unit_counts_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(52);
        for _ in 0..SWEEP {
            let q = MeasurementStrand.generate(&mut rng);
            if q.prompt.starts_with("How many") {
                let units: i64 = q.correct_answer.canonical().parse().unwrap();
                assert!((3..=7).contains(&units));
            }
        }
    }
}
