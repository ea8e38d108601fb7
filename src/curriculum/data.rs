// src/curriculum/data.rs

//! Reading a simple bar graph.

use rand::{Rng, RngCore, seq::SliceRandom};

use super::{Strand, StrandGenerator, compose_question};
use crate::models::question::{AnswerValue, Question};

pub struct DataStrand;

const GROUPS: [&str; 3] = ["Cats 🐱", "Dogs 🐶", "Birds 🐦"];

impl StrandGenerator for DataStrand {
    fn strand(&self) -> Strand {
        Strand::Data
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Question {
        let mut groups = GROUPS;
        groups.shuffle(rng);
        let [first, second, _] = groups;

        let first_count: usize = rng.random_range(3..=9);
        let mut second_count: usize = rng.random_range(3..=8);
        if second_count >= first_count {
            second_count += 1;
        }

        let graph = format!(
            "{}: {} ({})<br>{}: {} ({})",
            first,
            "█".repeat(first_count),
            first_count,
            second,
            "█".repeat(second_count),
            second_count
        );
        let prompt = format!(
            "Look at the graph. Which group has <b>more</b>?<br><div class='graph'>{}</div>",
            graph
        );

        let (more, fewer) = if first_count > second_count {
            (first, second)
        } else {
            (second, first)
        };

        compose_question(Strand::Data, prompt, more.into(), [AnswerValue::from(fewer)], rng)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::curriculum::testing::{SWEEP, assert_well_formed};

    fn count_for(prompt: &str, group: &str) -> Option<usize> {
        let after = prompt.split(&format!("{}: ", group)).nth(1)?;
        Some(after.chars().take_while(|c| *c == '█').count())
    }

    #[test]
    fn answer_is_the_larger_group() {
        let mut rng = StdRng::seed_from_u64(121);
        for _ in 0..SWEEP {
            let q = DataStrand.generate(&mut rng);
            assert_well_formed(&q);
            assert_eq!(q.options.len(), 2);

            let answer = q.correct_answer.canonical();
            let other = q
                .options
                .iter()
                .map(|o| o.canonical())
                .find(|o| *o != answer)
                .unwrap();
            let winner = count_for(&q.prompt, &answer).unwrap();
            let loser = count_for(&q.prompt, &other).unwrap();
            assert!(winner > loser);
            assert!((3..=9).contains(&winner) && (3..=9).contains(&loser));
        }
    }
}
