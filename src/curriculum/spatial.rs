// src/curriculum/spatial.rs

//! 2D and 3D shapes, position words, counting sides.

use rand::{RngCore, seq::IndexedRandom};

use super::{Strand, StrandGenerator, compose_question, pick};
use crate::models::question::{AnswerValue, Question};

pub struct SpatialStrand;

/// Distractors drawn from a pool are capped at this many.
const MAX_DISTRACTORS: usize = 2;

#[derive(Debug, Clone, Copy)]
enum Mode {
    Identify2d,
    Identify3d,
    Position,
    CountSides,
    SameShape,
}

/// 2D identification is drawn twice as often.
const MODES: [Mode; 6] = [
    Mode::Identify2d,
    Mode::Identify2d,
    Mode::Identify3d,
    Mode::Position,
    Mode::CountSides,
    Mode::SameShape,
];

struct Shape {
    name: &'static str,
    svg: &'static str,
}

const TRIANGLE_SVG: &str = r##"<svg width="50" height="45" viewBox="0 0 50 45"><polygon points="25,2 48,43 2,43" fill="#e74c3c"/></svg>"##;
const SQUARE_SVG: &str = r##"<svg width="50" height="50" viewBox="0 0 50 50"><rect x="3" y="3" width="44" height="44" fill="#2ecc71"/></svg>"##;
const RECTANGLE_SVG: &str = r##"<svg width="70" height="40" viewBox="0 0 70 40"><rect x="2" y="2" width="66" height="36" fill="#9b59b6"/></svg>"##;

const SHAPES_2D: &[Shape] = &[
    Shape { name: "Triangle", svg: TRIANGLE_SVG },
    Shape {
        name: "Circle",
        svg: r##"<svg width="50" height="50" viewBox="0 0 50 50"><circle cx="25" cy="25" r="22" fill="#3498db"/></svg>"##,
    },
    Shape { name: "Square", svg: SQUARE_SVG },
    Shape { name: "Rectangle", svg: RECTANGLE_SVG },
];

const SHAPES_3D: &[Shape] = &[
    Shape {
        name: "Sphere",
        svg: r##"<svg width="60" height="60" viewBox="0 0 60 60"><defs><radialGradient id="sphere-shade" cx="30%" cy="30%"><stop offset="0%" stop-color="#5dade2"/><stop offset="100%" stop-color="#2874a6"/></radialGradient></defs><circle cx="30" cy="30" r="26" fill="url(#sphere-shade)"/></svg>"##,
    },
    Shape {
        name: "Cube",
        svg: r##"<svg width="60" height="60" viewBox="0 0 60 60"><polygon points="10,20 30,10 50,20 30,30" fill="#58d68d"/><polygon points="10,20 30,30 30,55 10,45" fill="#2ecc71"/><polygon points="30,30 50,20 50,45 30,55" fill="#1d8348"/></svg>"##,
    },
    Shape {
        name: "Cylinder",
        svg: r##"<svg width="50" height="65" viewBox="0 0 50 65"><rect x="5" y="12" width="40" height="40" fill="#9b59b6"/><ellipse cx="25" cy="52" rx="20" ry="10" fill="#7d3c98"/><ellipse cx="25" cy="12" rx="20" ry="10" fill="#d7bde2"/></svg>"##,
    },
    Shape {
        name: "Cone",
        svg: r##"<svg width="50" height="60" viewBox="0 0 50 60"><polygon points="25,5 45,50 5,50" fill="#f5b041"/><ellipse cx="25" cy="50" rx="20" ry="8" fill="#d68910"/></svg>"##,
    },
];

/// A picture and the item sitting in the named position.
struct Scene {
    position: &'static str,
    picture: &'static str,
    target: &'static str,
    reference: &'static str,
}

const SCENES: &[Scene] = &[
    Scene { position: "above", picture: "🏠<br>🚗", target: "house", reference: "car" },
    Scene { position: "below", picture: "🌳<br>🐕", target: "dog", reference: "tree" },
    Scene { position: "beside", picture: "🧸 📚", target: "teddy bear", reference: "book" },
    Scene { position: "between", picture: "🍎 🍌 🍊", target: "banana", reference: "apple and orange" },
];

const SCENE_ITEMS: &[&str] = &[
    "house", "car", "tree", "dog", "teddy bear", "book", "banana", "apple", "orange",
];

/// Polygons with their side counts, drawn from the 2D pool.
const SIDED: &[(&str, i64, &str)] = &[
    ("Triangle", 3, TRIANGLE_SVG),
    ("Square", 4, SQUARE_SVG),
    ("Rectangle", 4, RECTANGLE_SVG),
];

const SIDE_CHOICES: [i64; 3] = [3, 4, 5];

/// The same shape drawn small and large.
const SIZE_PAIRS: &[(&str, &str, &str)] = &[
    (
        "Triangle",
        r##"<svg width="40" height="35"><polygon points="20,2 38,33 2,33" fill="#e74c3c"/></svg>"##,
        r##"<svg width="50" height="45"><polygon points="25,2 48,43 2,43" fill="#c0392b"/></svg>"##,
    ),
    (
        "Circle",
        r##"<svg width="35" height="35"><circle cx="17" cy="17" r="15" fill="#3498db"/></svg>"##,
        r##"<svg width="50" height="50"><circle cx="25" cy="25" r="22" fill="#2980b9"/></svg>"##,
    ),
    (
        "Square",
        r##"<svg width="35" height="35"><rect x="2" y="2" width="31" height="31" fill="#2ecc71"/></svg>"##,
        r##"<svg width="50" height="50"><rect x="2" y="2" width="46" height="46" fill="#27ae60"/></svg>"##,
    ),
];

impl StrandGenerator for SpatialStrand {
    fn strand(&self) -> Strand {
        Strand::Spatial
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Question {
        let (prompt, answer, distractors) = match *pick(&MODES, rng) {
            Mode::Identify2d => identify(SHAPES_2D, rng),
            Mode::Identify3d => identify(SHAPES_3D, rng),
            Mode::Position => {
                let scene = pick(SCENES, rng);
                let prompt = format!(
                    "Look at the picture:<br><div style='font-size:2.5rem;margin:15px 0;'>{}</div><br>What is <b>{}</b> the {}?",
                    scene.picture, scene.position, scene.reference
                );
                let others: Vec<&str> = SCENE_ITEMS
                    .iter()
                    .copied()
                    .filter(|item| *item != scene.target)
                    .collect();
                (prompt, scene.target.into(), sample_text(&others, rng))
            }
            Mode::CountSides => {
                let (_, sides, svg) = pick(SIDED, rng);
                let prompt = format!(
                    "How many <b>sides</b> does this shape have?<br><div style='margin:15px 0;'>{}</div>",
                    svg
                );
                let distractors = SIDE_CHOICES
                    .iter()
                    .filter(|n| *n != sides)
                    .map(|n| AnswerValue::Text(n.to_string()))
                    .collect();
                (prompt, AnswerValue::Text(sides.to_string()), distractors)
            }
            Mode::SameShape => {
                let (name, small, large) = pick(SIZE_PAIRS, rng);
                let prompt = format!(
                    "These shapes are both the same type. What shape are they?<br><div style='margin:15px 0;display:flex;justify-content:center;gap:20px;align-items:center;'>{}{}</div>",
                    small, large
                );
                let others: Vec<&str> = SHAPES_2D
                    .iter()
                    .map(|shape| shape.name)
                    .filter(|other| other != name)
                    .collect();
                (prompt, (*name).into(), sample_text(&others, rng))
            }
        };

        compose_question(Strand::Spatial, prompt, answer, distractors, rng)
    }
}

/// "Which one is a ...?" with SVG options.
fn identify(pool: &[Shape], rng: &mut dyn RngCore) -> (String, AnswerValue, Vec<AnswerValue>) {
    let target = pick(pool, rng);
    let others: Vec<&str> = pool
        .iter()
        .filter(|shape| shape.name != target.name)
        .map(|shape| shape.svg)
        .collect();
    (
        format!("Which one is a <b>{}</b>?", target.name),
        target.svg.into(),
        sample_text(&others, rng),
    )
}

fn sample_text(pool: &[&str], rng: &mut dyn RngCore) -> Vec<AnswerValue> {
    pool.choose_multiple(rng, MAX_DISTRACTORS)
        .map(|item| AnswerValue::from(*item))
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::curriculum::testing::{SWEEP, assert_well_formed};

    #[test]
    fn sweep_is_well_formed_and_capped() {
        let mut rng = StdRng::seed_from_u64(31);
        for _ in 0..SWEEP {
            let q = SpatialStrand.generate(&mut rng);
            assert_well_formed(&q);
            assert!(q.options.len() <= MAX_DISTRACTORS + 1);
        }
    }

    #[test]
    fn identify_answers_with_the_named_shape() {
        let mut rng = StdRng::seed_from_u64(32);
        for _ in 0..50 {
            let (prompt, answer, _) = identify(SHAPES_3D, &mut rng);
            let shape = SHAPES_3D
                .iter()
                .find(|s| prompt.contains(&format!("<b>{}</b>", s.name)))
                .unwrap();
            assert_eq!(answer, AnswerValue::from(shape.svg));
        }
    }

    #[test]
    fn side_counts_match_the_polygon() {
        for (name, sides, _) in SIDED {
            let expected = match *name {
                "Triangle" => 3,
                _ => 4,
            };
            assert_eq!(*sides, expected);
            assert!(SIDE_CHOICES.contains(sides));
        }
    }

    #[test]
    fn scene_targets_are_known_items() {
        for scene in SCENES {
            assert!(SCENE_ITEMS.contains(&scene.target));
        }
    }
}
