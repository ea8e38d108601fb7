// src/curriculum/word_problems.rs

//! Story-based addition and subtraction.

use rand::{Rng, RngCore};

use super::{Strand, StrandGenerator, compose_question, lower_or_raise, pick};
use crate::models::question::{AnswerValue, Question};

pub struct WordProblemStrand;

/// A story with `{a}` and `{b}` placeholders and the emoji it counts.
struct Story {
    text: &'static str,
    emoji: &'static str,
}

const ADDITION_STORIES: &[Story] = &[
    Story { text: "Sara has {a} 🍎 apples. Mom gives her {b} more. How many apples does Sara have now?", emoji: "🍎" },
    Story { text: "There are {a} 🐦 birds in a tree. {b} more birds fly in. How many birds are there now?", emoji: "🐦" },
    Story { text: "Tom has {a} 🍪 cookies. He bakes {b} more. How many cookies does he have?", emoji: "🍪" },
    Story { text: "You have {a} ⭐ stickers. Your friend gives you {b} more. How many stickers do you have?", emoji: "⭐" },
];

const SUBTRACTION_STORIES: &[Story] = &[
    Story { text: "You have {a} 🎈 balloons. {b} pop! How many balloons are left?", emoji: "🎈" },
    Story { text: "There are {a} 🍪 cookies. You eat {b}. How many cookies are left?", emoji: "🍪" },
    Story { text: "{a} 🐸 frogs are on a log. {b} jump away. How many frogs are still on the log?", emoji: "🐸" },
    Story { text: "Mom baked {a} 🧁 cupcakes. You ate {b}. How many are left?", emoji: "🧁" },
];

impl Story {
    fn tell(&self, a: i64, b: i64) -> String {
        self.text
            .replace("{a}", &a.to_string())
            .replace("{b}", &b.to_string())
    }
}

impl StrandGenerator for WordProblemStrand {
    fn strand(&self) -> Strand {
        Strand::WordProblems
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Question {
        let (prompt, answer) = if rng.random_bool(0.5) {
            let story = pick(ADDITION_STORIES, rng);
            let a: i64 = rng.random_range(2..=8);
            let b: i64 = rng.random_range(1..=5);
            let prompt = format!(
                "{}<div style='font-size:1.5rem;margin:10px 0'>{} + {}</div>",
                story.tell(a, b),
                story.emoji.repeat(a as usize),
                story.emoji.repeat(b as usize)
            );
            (prompt, a + b)
        } else {
            let story = pick(SUBTRACTION_STORIES, rng);
            let a: i64 = rng.random_range(5..=10);
            let b: i64 = rng.random_range(1..a);
            (story.tell(a, b), a - b)
        };

        let distractors = [answer + 1, lower_or_raise(answer, 1)]
            .map(|n| AnswerValue::Text(n.to_string()));

        compose_question(
            Strand::WordProblems,
            prompt,
            AnswerValue::Text(answer.to_string()),
            distractors,
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
    fn stories_fill_both_placeholders() {
        let told = ADDITION_STORIES[0].tell(3, 4);
        assert!(told.starts_with("Sara has 3"));
        assert!(told.contains("gives her 4 more"));
        for story in ADDITION_STORIES.iter().chain(SUBTRACTION_STORIES) {
            let told = story.tell(1, 2);
            assert!(!told.contains("{a}") && !told.contains("{b}"));
        }
    }

    #[test]
    fn answers_stay_positive_and_in_range() {
        let mut rng = StdRng::seed_from_u64(61);
        for _ in 0..SWEEP {
            let q = WordProblemStrand.generate(&mut rng);
            assert_well_formed(&q);
            let answer: i64 = q.correct_answer.canonical().parse().unwrap();
            assert!((1..=13).contains(&answer));
            for option in &q.options {
                assert!(option.canonical().parse::<i64>().unwrap() > 0);
            }
        }
    }
}
