// src/curriculum/financial.rs

//! Identifying and counting Canadian coins.

use std::collections::HashSet;

use rand::{Rng, RngCore, seq::IndexedRandom};

use super::{Strand, StrandGenerator, compose_question, pick};
use crate::models::question::{AnswerValue, Question};

pub struct FinancialStrand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coin {
    Nickel,
    Dime,
    Quarter,
    Loonie,
    Toonie,
}

impl Coin {
    pub const ALL: [Coin; 5] = [Coin::Nickel, Coin::Dime, Coin::Quarter, Coin::Loonie, Coin::Toonie];

    pub fn cents(self) -> i64 {
        match self {
            Coin::Nickel => 5,
            Coin::Dime => 10,
            Coin::Quarter => 25,
            Coin::Loonie => 100,
            Coin::Toonie => 200,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Coin::Nickel => "Nickel",
            Coin::Dime => "Dime",
            Coin::Quarter => "Quarter",
            Coin::Loonie => "Loonie ($1)",
            Coin::Toonie => "Toonie ($2)",
        }
    }

    /// CSS class the front end draws the coin with.
    pub fn css_class(self) -> &'static str {
        match self {
            Coin::Nickel => "nickel",
            Coin::Dime => "dime",
            Coin::Quarter => "quarter",
            Coin::Loonie => "loonie",
            Coin::Toonie => "toonie",
        }
    }

    fn markup(self) -> String {
        format!("<div class='coin {}'></div>", self.css_class())
    }
}

/// Offsets applied to a pile total to make wrong answers.
const NEAR_MISSES: [i64; 6] = [-5, 5, -10, 10, -25, 25];

/// `$3.25` from 100 cents up, `45¢` below.
pub fn format_cents(cents: i64) -> String {
    if cents >= 100 {
        format!("${}.{:02}", cents / 100, cents % 100)
    } else {
        format!("{}¢", cents)
    }
}

pub fn pile_total(pile: &[Coin]) -> i64 {
    pile.iter().map(|coin| coin.cents()).sum()
}

impl StrandGenerator for FinancialStrand {
    fn strand(&self) -> Strand {
        Strand::Financial
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Question {
        if rng.random_bool(0.5) {
            identify(rng)
        } else {
            count_pile(rng)
        }
    }
}

fn identify(rng: &mut dyn RngCore) -> Question {
    let target = *pick(&Coin::ALL, rng);
    let prompt = format!(
        "<div class='coin-container'>{}</div><br>What is this coin?",
        target.markup()
    );
    let others: Vec<Coin> = Coin::ALL.into_iter().filter(|c| *c != target).collect();
    let distractors: Vec<AnswerValue> = others
        .choose_multiple(rng, 2)
        .map(|coin| coin.name().into())
        .collect();

    compose_question(Strand::Financial, prompt, target.name().into(), distractors, rng)
}

fn count_pile(rng: &mut dyn RngCore) -> Question {
    let size = rng.random_range(2..=4);
    let pile: Vec<Coin> = (0..size).map(|_| *pick(&Coin::ALL, rng)).collect();
    let total = pile_total(&pile);

    let coins: String = pile.iter().map(|coin| coin.markup()).collect();
    let prompt = format!(
        "How much money is this?<br><div class='coin-container'>{}</div>",
        coins
    );

    // Two distinct positive near misses; +5 and +10 always qualify.
    let mut misses = HashSet::new();
    let mut distractors = Vec::new();
    while distractors.len() < 2 {
        let value = total + pick(&NEAR_MISSES, rng);
        if value > 0 && value != total && misses.insert(value) {
            distractors.push(AnswerValue::Text(format_cents(value)));
        }
    }

    compose_question(
        Strand::Financial,
        prompt,
        AnswerValue::Text(format_cents(total)),
        distractors,
        rng,
    )
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::curriculum::testing::{SWEEP, assert_well_formed};

    fn coins_in(prompt: &str) -> Vec<Coin> {
        prompt
            .split("<div class='coin ")
            .skip(1)
            .map(|rest| {
                let class = rest.split('\'').next().unwrap();
                Coin::ALL
                    .into_iter()
                    .find(|c| c.css_class() == class)
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn formats_cents_and_dollars() {
        assert_eq!(format_cents(45), "45¢");
        assert_eq!(format_cents(5), "5¢");
        assert_eq!(format_cents(99), "99¢");
        assert_eq!(format_cents(100), "$1.00");
        assert_eq!(format_cents(325), "$3.25");
        assert_eq!(format_cents(805), "$8.05");
    }

    #[test]
    fn pile_total_sums_the_coins() {
        assert_eq!(pile_total(&[Coin::Quarter, Coin::Dime]), 35);
        assert_eq!(pile_total(&[Coin::Toonie, Coin::Loonie, Coin::Nickel]), 305);
    }

    #[test]
    fn counted_piles_match_their_answer() {
        let mut rng = StdRng::seed_from_u64(91);
        let mut counted = 0;
        for _ in 0..SWEEP {
            let q = FinancialStrand.generate(&mut rng);
            assert_well_formed(&q);
            assert_eq!(q.options.len(), 3);
            if !q.prompt.starts_with("How much money") {
                continue;
            }
            counted += 1;
            let pile = coins_in(&q.prompt);
            assert!((2..=4).contains(&pile.len()));
            assert_eq!(q.correct_answer.canonical(), format_cents(pile_total(&pile)));
        }
        assert!(counted > 0);
    }

    #[test]
    fn identify_answers_with_the_pictured_coin() {
        let mut rng = StdRng::seed_from_u64(92);
        for _ in 0..100 {
            let q = identify(&mut rng);
            let pictured = coins_in(&q.prompt);
            assert_eq!(pictured.len(), 1);
            assert_eq!(q.correct_answer, AnswerValue::from(pictured[0].name()));
        }
    }
}
