// src/curriculum/place_value.rs

//! Tens and ones for numbers to 50.

use rand::{Rng, RngCore};

use super::{Strand, StrandGenerator, compose_question, pick};
use crate::models::question::{AnswerValue, Question};

pub struct PlaceValueStrand;

#[derive(Debug, Clone, Copy)]
enum Mode {
    IdentifyTens,
    IdentifyOnes,
    Compose,
    Decompose,
}

const MODES: [Mode; 4] = [Mode::IdentifyTens, Mode::IdentifyOnes, Mode::Compose, Mode::Decompose];

/// Largest tens digit reachable with numbers to 50.
const MAX_TENS: i64 = 5;

/// Base-ten blocks: a brown square per ten, a yellow one per one.
pub fn blocks(number: i64) -> String {
    let (tens, ones) = split(number);
    let mut parts = vec!["🟫"; tens as usize];
    parts.extend(vec!["🟨"; ones as usize]);
    parts.join(" ")
}

/// (tens, ones)
pub fn split(number: i64) -> (i64, i64) {
    (number / 10, number % 10)
}

fn describe(tens: i64, ones: i64) -> String {
    format!("{} tens, {} ones", tens, ones)
}

impl StrandGenerator for PlaceValueStrand {
    fn strand(&self) -> Strand {
        Strand::PlaceValue
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Question {
        let (prompt, answer, distractors): (String, String, Vec<String>) = match *pick(&MODES, rng) {
            Mode::IdentifyTens => {
                let number: i64 = rng.random_range(10..=50);
                let (tens, ones) = split(number);
                let neighbour = if tens < MAX_TENS { tens + 1 } else { tens - 1 };
                (
                    identify_prompt("tens", number),
                    tens.to_string(),
                    vec![neighbour.to_string(), ones.to_string()],
                )
            }
            Mode::IdentifyOnes => {
                let number: i64 = rng.random_range(10..=50);
                let (tens, ones) = split(number);
                (
                    identify_prompt("ones", number),
                    ones.to_string(),
                    vec![tens.to_string(), ((ones + 2) % 10).to_string()],
                )
            }
            Mode::Compose => {
                let tens: i64 = rng.random_range(1..=4);
                let ones: i64 = rng.random_range(0..=9);
                let value = tens * 10 + ones;
                let nudged = if ones < 9 { value + 1 } else { value - 1 };
                (
                    format!("<b>{} tens</b> and <b>{} ones</b> = ?", tens, ones),
                    value.to_string(),
                    vec![(value + 10).to_string(), nudged.to_string()],
                )
            }
            Mode::Decompose => {
                let number: i64 = rng.random_range(11..=49);
                let (tens, ones) = split(number);
                let nudged_ones = if ones < 9 { ones + 1 } else { ones - 1 };
                (
                    format!("Break apart <b>{}</b> into tens and ones:", number),
                    describe(tens, ones),
                    vec![describe(tens + 1, ones), describe(tens, nudged_ones)],
                )
            }
        };

        compose_question(
            Strand::PlaceValue,
            prompt,
            AnswerValue::Text(answer),
            distractors.into_iter().map(AnswerValue::Text),
            rng,
        )
    }
}

fn identify_prompt(place: &str, number: i64) -> String {
    format!(
        "How many <b>{}</b> are in the number {}?<br><div style='font-size:1.5rem;margin:10px 0'>{}</div>",
        place,
        number,
        blocks(number)
    )
}
