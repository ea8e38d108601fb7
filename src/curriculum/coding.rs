// src/curriculum/coding.rs

//! Sequencing, debugging, conditionals, loops and grid routing.

use std::collections::HashSet;

use rand::{Rng, RngCore, seq::SliceRandom};

use super::{Strand, StrandGenerator, compose_question, pick};
use crate::models::question::{AnswerValue, Question};

pub struct CodingStrand;

pub const GRID_SIZE: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn arrow(self) -> &'static str {
        match self {
            Move::Up => "⬆️",
            Move::Down => "⬇️",
            Move::Left => "⬅️",
            Move::Right => "➡️",
        }
    }

    /// (row, column) delta.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Move::Up => (-1, 0),
            Move::Down => (1, 0),
            Move::Left => (0, -1),
            Move::Right => (0, 1),
        }
    }

    pub fn opposite(self) -> Move {
        match self {
            Move::Up => Move::Down,
            Move::Down => Move::Up,
            Move::Left => Move::Right,
            Move::Right => Move::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub row: i32,
    pub col: i32,
}

impl Cell {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn step(self, mv: Move) -> Cell {
        let (dr, dc) = mv.delta();
        Cell::new(self.row + dr, self.col + dc)
    }

    #[cfg(test)]
    fn manhattan(self, other: Cell) -> usize {
        ((self.row - other.row).abs() + (self.col - other.col).abs()) as usize
    }
}

/// Shortest route on the grid: all vertical moves, then all horizontal ones.
pub fn route(start: Cell, end: Cell) -> Vec<Move> {
    let vertical = if end.row > start.row { Move::Down } else { Move::Up };
    let horizontal = if end.col > start.col { Move::Right } else { Move::Left };

    let mut path = vec![vertical; (end.row - start.row).unsigned_abs() as usize];
    path.extend(vec![horizontal; (end.col - start.col).unsigned_abs() as usize]);
    path
}

/// Where `path` leaves a robot that starts on `start`.
#[cfg(test)]
fn follow(start: Cell, path: &[Move]) -> Cell {
    path.iter().fold(start, |cell, mv| cell.step(*mv))
}

pub fn spell(path: &[Move]) -> String {
    path.iter().map(|mv| mv.arrow()).collect::<Vec<_>>().join(" ")
}

#[derive(Debug, Clone, Copy)]
enum Mode {
    GridRoute,
    Debug,
    Conditional,
    Repeat,
    Sequence,
}

/// Grid routing is drawn twice as often.
const MODES: [Mode; 6] = [
    Mode::GridRoute,
    Mode::GridRoute,
    Mode::Debug,
    Mode::Conditional,
    Mode::Repeat,
    Mode::Sequence,
];

struct DebugPuzzle {
    task: &'static str,
    buggy: &'static str,
    fixed: &'static str,
}

const DEBUG_PUZZLES: &[DebugPuzzle] = &[
    DebugPuzzle { task: "The robot wants to go <b>RIGHT</b> then <b>DOWN</b>.", buggy: "⬇️ ➡️", fixed: "➡️ ⬇️" },
    DebugPuzzle { task: "The robot wants to go <b>UP</b> twice.", buggy: "⬆️ ⬇️", fixed: "⬆️ ⬆️" },
    DebugPuzzle { task: "The robot wants to go <b>LEFT</b> then <b>LEFT</b> again.", buggy: "⬅️ ➡️", fixed: "⬅️ ⬅️" },
    DebugPuzzle { task: "The robot wants to go <b>DOWN</b> then <b>RIGHT</b>.", buggy: "➡️ ⬇️", fixed: "⬇️ ➡️" },
];

/// A rule, the situation today, and the outcomes to choose from.
struct Conditional {
    rule: &'static str,
    situation: &'static str,
    outcome: &'static str,
    others: [&'static str; 2],
}

const WEATHER_RULE: &str = "If it is <b>sunny ☀️</b>, go to the park. If it is <b>rainy 🌧️</b>, stay home.";
const LIGHT_RULE: &str = "If the light is <b>green 🟢</b>, walk. If the light is <b>red 🔴</b>, stop.";
const NEEDS_RULE: &str = "If you are <b>hungry 🍽️</b>, eat food. If you are <b>thirsty 💧</b>, drink water.";

const CONDITIONALS: &[Conditional] = &[
    Conditional { rule: WEATHER_RULE, situation: "sunny ☀️", outcome: "Go to the park", others: ["Stay home", "Go to school"] },
    Conditional { rule: WEATHER_RULE, situation: "rainy 🌧️", outcome: "Stay home", others: ["Go to the park", "Go swimming"] },
    Conditional { rule: LIGHT_RULE, situation: "green 🟢", outcome: "Walk", others: ["Stop", "Run"] },
    Conditional { rule: LIGHT_RULE, situation: "red 🔴", outcome: "Stop", others: ["Walk", "Jump"] },
    Conditional { rule: NEEDS_RULE, situation: "hungry 🍽️", outcome: "Eat food", others: ["Drink water", "Go to sleep"] },
    Conditional { rule: NEEDS_RULE, situation: "thirsty 💧", outcome: "Drink water", others: ["Eat food", "Watch TV"] },
];

/// Repeat `body` `times` times; wrong answers use other lengths or orders.
struct Loop {
    instruction: &'static str,
    body: &'static [&'static str],
    times: usize,
    wrong: [&'static str; 2],
}

const LOOPS: &[Loop] = &[
    Loop { instruction: "Do this <b>3 times</b>: Clap 👏", body: &["👏"], times: 3, wrong: ["👏 👏", "👏 👏 👏 👏"] },
    Loop { instruction: "Do this <b>2 times</b>: Jump ⬆️ then Spin 🔄", body: &["⬆️", "🔄"], times: 2, wrong: ["⬆️ ⬆️ 🔄 🔄", "⬆️ 🔄"] },
    Loop { instruction: "Do this <b>4 times</b>: Step ➡️", body: &["➡️"], times: 4, wrong: ["➡️ ➡️ ➡️", "➡️ ➡️"] },
    Loop { instruction: "Do this <b>2 times</b>: Wave 👋", body: &["👋"], times: 2, wrong: ["👋 👋 👋", "👋"] },
];

impl Loop {
    fn unrolled(&self) -> String {
        self.body.repeat(self.times).join(" ")
    }
}

struct Routine {
    task: &'static str,
    steps: [&'static str; 3],
    scrambled: [[usize; 3]; 2],
}

const ROUTINES: &[Routine] = &[
    Routine { task: "How do you make a sandwich?", steps: ["Get bread", "Add filling", "Close sandwich"], scrambled: [[1, 0, 2], [2, 0, 1]] },
    Routine { task: "How do you brush your teeth?", steps: ["Get toothbrush", "Add toothpaste", "Brush teeth"], scrambled: [[2, 1, 0], [1, 2, 0]] },
    Routine { task: "How do you get dressed?", steps: ["Put on shirt", "Put on pants", "Put on shoes"], scrambled: [[2, 0, 1], [1, 2, 0]] },
    Routine { task: "How do you plant a seed?", steps: ["Dig a hole", "Put in seed", "Cover with soil"], scrambled: [[1, 0, 2], [2, 1, 0]] },
];

impl Routine {
    fn in_order(&self, order: [usize; 3]) -> String {
        order.map(|i| self.steps[i]).join(" → ")
    }
}

impl StrandGenerator for CodingStrand {
    fn strand(&self) -> Strand {
        Strand::Coding
    }

    fn generate(&self, rng: &mut dyn RngCore) -> Question {
        let (prompt, answer, distractors) = match *pick(&MODES, rng) {
            Mode::GridRoute => grid_route(rng),
            Mode::Debug => {
                let puzzle = pick(DEBUG_PUZZLES, rng);
                let prompt = format!(
                    "{}<br><br><div style='background:#fff3cd;padding:15px;border-radius:10px;margin:10px 0;'><b>Code:</b> <span style='font-size:1.5rem;'>{}</span></div><p>This code has a <b>bug</b>! Which code is correct?</p>",
                    puzzle.task, puzzle.buggy
                );
                let mutated = if puzzle.buggy.contains(Move::Up.arrow()) {
                    puzzle.buggy.replace(Move::Up.arrow(), Move::Down.arrow())
                } else {
                    format!("{} {}", puzzle.buggy, Move::Right.arrow())
                };
                (prompt, puzzle.fixed.to_string(), vec![puzzle.buggy.to_string(), mutated])
            }
            Mode::Conditional => {
                let scenario = pick(CONDITIONALS, rng);
                let prompt = format!(
                    "<div style='background:#e8f4fc;padding:15px;border-radius:10px;margin:10px 0;'><b>Rule:</b> {}</div><p>Today it is <b>{}</b>. What should you do?</p>",
                    scenario.rule, scenario.situation
                );
                (
                    prompt,
                    scenario.outcome.to_string(),
                    scenario.others.iter().map(|o| o.to_string()).collect(),
                )
            }
            Mode::Repeat => {
                let pattern = pick(LOOPS, rng);
                let prompt = format!(
                    "<div style='background:#f0fff0;padding:15px;border-radius:10px;margin:10px 0;'><b>Instruction:</b> {}</div><p>What does this look like?</p>",
                    pattern.instruction
                );
                (
                    prompt,
                    pattern.unrolled(),
                    pattern.wrong.iter().map(|w| w.to_string()).collect(),
                )
            }
            Mode::Sequence => {
                let routine = pick(ROUTINES, rng);
                let prompt = format!(
                    "<p><b>{}</b></p><p>Put the steps in the <b>correct order</b>:</p>",
                    routine.task
                );
                (
                    prompt,
                    routine.in_order([0, 1, 2]),
                    routine.scrambled.iter().map(|order| routine.in_order(*order)).collect(),
                )
            }
        };

        compose_question(
            Strand::Coding,
            prompt,
            AnswerValue::Text(answer),
            distractors.into_iter().map(AnswerValue::Text),
            rng,
        )
    }
}

/// Two distinct grid cells, start first.
fn distinct_cells(rng: &mut dyn RngCore) -> (Cell, Cell) {
    let cells = GRID_SIZE * GRID_SIZE;
    let first = rng.random_range(0..cells);
    let mut second = rng.random_range(0..cells - 1);
    if second >= first {
        second += 1;
    }
    let to_cell = |i: i32| Cell::new(i / GRID_SIZE, i % GRID_SIZE);
    (to_cell(first), to_cell(second))
}

fn grid_route(rng: &mut dyn RngCore) -> (String, String, Vec<String>) {
    let (start, end) = distinct_cells(rng);
    let path = route(start, end);
    let answer = spell(&path);

    let mut grid = String::from("<table class='maze-grid'>");
    for row in 0..GRID_SIZE {
        grid.push_str("<tr>");
        for col in 0..GRID_SIZE {
            let cell = Cell::new(row, col);
            let content = if cell == start {
                "🤖"
            } else if cell == end {
                "⭐"
            } else {
                "⬜"
            };
            grid.push_str(&format!("<td>{}</td>", content));
        }
        grid.push_str("</tr>");
    }
    grid.push_str("</table>");

    let prompt = format!("Which code gets the Robot 🤖 to the Star ⭐?<br>{}", grid);
    (prompt, answer, route_distractors(&path, rng))
}

/// Bounded number of random mutation rounds before the fallback kicks in.
const MUTATION_ROUNDS: usize = 32;

/// Two move sequences that differ from `path` and from each other.
pub fn route_distractors(path: &[Move], rng: &mut dyn RngCore) -> Vec<String> {
    let correct = spell(path);
    let shuffleable = path.iter().collect::<HashSet<_>>().len() > 1;

    let mut seen = HashSet::from([correct.clone()]);
    let mut distractors = Vec::new();

    for _ in 0..MUTATION_ROUNDS {
        if distractors.len() == 2 {
            break;
        }
        let mut candidate = path.to_vec();
        match rng.random_range(0..3) {
            0 if shuffleable => candidate.shuffle(rng),
            1 if !candidate.is_empty() => {
                let i = rng.random_range(0..candidate.len());
                candidate[i] = candidate[i].opposite();
            }
            _ => candidate.push(*pick(&Move::ALL, rng)),
        }
        let spelled = spell(&candidate);
        if seen.insert(spelled.clone()) {
            distractors.push(spelled);
        }
    }

    // Appending one move always lengthens the path, so these differ from it.
    for mv in Move::ALL {
        if distractors.len() == 2 {
            break;
        }
        let mut candidate = path.to_vec();
        candidate.push(mv);
        let spelled = spell(&candidate);
        if seen.insert(spelled.clone()) {
            distractors.push(spelled);
        }
    }

    distractors
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::curriculum::testing::{SWEEP, assert_well_formed};

    fn all_cells() -> Vec<Cell> {
        (0..GRID_SIZE)
            .flat_map(|row| (0..GRID_SIZE).map(move |col| Cell::new(row, col)))
            .collect()
    }

    #[test]
    fn route_is_shortest_and_lands_on_the_end() {
        for start in all_cells() {
            for end in all_cells().into_iter().filter(|c| *c != start) {
                let path = route(start, end);
                assert!(!path.is_empty());
                assert_eq!(path.len(), start.manhattan(end));
                assert_eq!(follow(start, &path), end);
            }
        }
    }

    #[test]
    fn route_moves_vertically_first() {
        let path = route(Cell::new(0, 2), Cell::new(2, 0));
        assert_eq!(path, vec![Move::Down, Move::Down, Move::Left, Move::Left]);
    }

    #[test]
    fn sampled_cells_are_distinct() {
        let mut rng = StdRng::seed_from_u64(101);
        for _ in 0..SWEEP {
            let (start, end) = distinct_cells(&mut rng);
            assert_ne!(start, end);
            assert!((0..GRID_SIZE).contains(&start.row) && (0..GRID_SIZE).contains(&end.col));
        }
    }

    #[test]
    fn single_direction_paths_still_get_two_distractors() {
        let mut rng = StdRng::seed_from_u64(102);
        for path in [vec![Move::Down], vec![Move::Left, Move::Left], vec![Move::Up; 2]] {
            let distractors = route_distractors(&path, &mut rng);
            assert_eq!(distractors.len(), 2);
            assert!(!distractors.contains(&spell(&path)));
            assert_ne!(distractors[0], distractors[1]);
        }
    }

    #[test]
    fn loops_unroll_to_the_expected_length() {
        for pattern in LOOPS {
            let unrolled = pattern.unrolled();
            assert_eq!(unrolled.split(' ').count(), pattern.body.len() * pattern.times);
            assert!(pattern.wrong.iter().all(|w| *w != unrolled));
        }
    }

    #[test]
    fn scrambled_routines_differ_from_the_right_order() {
        for routine in ROUTINES {
            for order in routine.scrambled {
                assert_ne!(order, [0, 1, 2]);
            }
        }
    }

    #[test]
    fn sweep_is_well_formed() {
        let mut rng = StdRng::seed_from_u64(103);
        for _ in 0..SWEEP {
            let q = CodingStrand.generate(&mut rng);
            assert_well_formed(&q);
            assert_eq!(q.options.len(), 3);
        }
    }
}
