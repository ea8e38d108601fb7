// src/curriculum/time.rs

//! Reading o'clock and half past on an analog clock.

use rand::{Rng, RngCore, seq::IndexedRandom};

use super::{Strand, StrandGenerator, compose_question, pick};
use crate::models::question::{AnswerValue, Question};

pub struct TimeStrand;

#[derive(Debug, Clone, Copy)]
enum Mode {
    OClock,
    HalfPast,
    Activity,
}

const MODES: [Mode; 3] = [Mode::OClock, Mode::HalfPast, Mode::Activity];

const ACTIVITIES: &[(&str, &str)] = &[
    ("wake up for school", "7:00"),
    ("eat lunch", "12:00"),
    ("eat dinner", "6:00"),
    ("go to bed", "8:00"),
];

const ACTIVITY_TIMES: &[&str] = &["7:00", "12:00", "6:00", "8:00", "3:00"];

/// Rotation in degrees, clockwise from 12, of the hour and minute hands.
pub fn hand_angles(hour: u32, minute: u32) -> (f64, f64) {
    let hour_angle = f64::from(hour % 12) * 30.0 + f64::from(minute) * 0.5;
    let minute_angle = f64::from(minute) * 6.0;
    (hour_angle, minute_angle)
}

/// SVG clock face with both hands rotated into place.
pub fn clock_face(hour: u32, minute: u32) -> String {
    let (hour_angle, minute_angle) = hand_angles(hour, minute);
    format!(
        concat!(
            r##"<svg class="clock" width="140" height="140" viewBox="0 0 100 100" style="display:block;margin:15px auto;">"##,
            r##"<circle cx="50" cy="50" r="45" fill="white" stroke="#333" stroke-width="3"/>"##,
            r##"<text x="50" y="18" text-anchor="middle" font-size="12" font-weight="bold">12</text>"##,
            r##"<text x="82" y="54" text-anchor="middle" font-size="12" font-weight="bold">3</text>"##,
            r##"<text x="50" y="92" text-anchor="middle" font-size="12" font-weight="bold">6</text>"##,
            r##"<text x="18" y="54" text-anchor="middle" font-size="12" font-weight="bold">9</text>"##,
            r##"<line x1="50" y1="50" x2="50" y2="28" stroke="#333" stroke-width="4" stroke-linecap="round" transform="rotate({}, 50, 50)"/>"##,
            r##"<line x1="50" y1="50" x2="50" y2="18" stroke="#666" stroke-width="2" stroke-linecap="round" transform="rotate({}, 50, 50)"/>"##,
            r##"<circle cx="50" cy="50" r="4" fill="#333"/></svg>"##,
        ),
        hour_angle, minute_angle
    )
}

impl StrandGenerator for TimeStrand {
    fn strand(&self) -> Strand {
        Strand::Time
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Question {
        let (prompt, answer, distractors) = match *pick(&MODES, rng) {
            Mode::OClock => {
                let hour: u32 = rng.random_range(1..=12);
                let next = next_hour(hour);
                (
                    read_prompt(hour, 0),
                    format!("{}:00", hour),
                    vec![format!("{}:00", next), format!("{}:30", hour)],
                )
            }
            Mode::HalfPast => {
                let hour: u32 = rng.random_range(1..=12);
                let next = next_hour(hour);
                (
                    read_prompt(hour, 30),
                    format!("{}:30", hour),
                    vec![format!("{}:00", hour), format!("{}:00", next)],
                )
            }
            Mode::Activity => {
                let (activity, time) = pick(ACTIVITIES, rng);
                let others: Vec<&str> = ACTIVITY_TIMES
                    .iter()
                    .copied()
                    .filter(|t| t != time)
                    .collect();
                (
                    format!("What time do most kids <b>{}</b>?", activity),
                    time.to_string(),
                    others
                        .choose_multiple(rng, 2)
                        .map(|t| t.to_string())
                        .collect(),
                )
            }
        };

        compose_question(
            Strand::Time,
            prompt,
            AnswerValue::Text(answer),
            distractors.into_iter().map(AnswerValue::Text),
            rng,
        )
    }
}

fn next_hour(hour: u32) -> u32 {
    hour % 12 + 1
}

fn read_prompt(hour: u32, minute: u32) -> String {
    format!("What time does the clock show?{}", clock_face(hour, minute))
}
