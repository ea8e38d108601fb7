// src/curriculum/mod.rs

//! Grade 1 practice question generators.
//!
//! Each strand lives in its own module behind [`StrandGenerator`]; the
//! [`Curriculum`] maps strand keys to generators.

pub mod algebra;
pub mod coding;
pub mod comparing;
pub mod data;
pub mod financial;
pub mod measurement;
pub mod number;
pub mod place_value;
pub mod skip_counting;
pub mod spatial;
pub mod time;
pub mod word_problems;

mod options;

use std::{collections::HashMap, fmt, str::FromStr};

use rand::RngCore;

pub use options::{assemble_options, compose_question, lower_or_raise, pick};

use crate::models::question::{Question, StrandInfo};

/// A curriculum topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Number,
    Algebra,
    Spatial,
    Data,
    Financial,
    Coding,
    PlaceValue,
    Time,
    Measurement,
    WordProblems,
    Comparing,
    SkipCounting,
}

impl Strand {
    /// Every valid strand, in menu order.
    pub const ALL: [Strand; 12] = [
        Strand::Number,
        Strand::Algebra,
        Strand::Spatial,
        Strand::Data,
        Strand::Financial,
        Strand::Coding,
        Strand::PlaceValue,
        Strand::Time,
        Strand::Measurement,
        Strand::WordProblems,
        Strand::Comparing,
        Strand::SkipCounting,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Strand::Number => "number",
            Strand::Algebra => "algebra",
            Strand::Spatial => "spatial",
            Strand::Data => "data",
            Strand::Financial => "financial",
            Strand::Coding => "coding",
            Strand::PlaceValue => "placevalue",
            Strand::Time => "time",
            Strand::Measurement => "measurement",
            Strand::WordProblems => "wordproblems",
            Strand::Comparing => "comparing",
            Strand::SkipCounting => "skipcounting",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strand::Number => "Number",
            Strand::Algebra => "Algebra",
            Strand::Spatial => "Spatial",
            Strand::Data => "Data",
            Strand::Financial => "Financial",
            Strand::Coding => "Coding",
            Strand::PlaceValue => "Place Value",
            Strand::Time => "Time",
            Strand::Measurement => "Measurement",
            Strand::WordProblems => "Word Problems",
            Strand::Comparing => "Comparing",
            Strand::SkipCounting => "Skip Counting",
        }
    }

    pub fn info(self) -> StrandInfo {
        StrandInfo {
            key: self.key(),
            label: self.label(),
        }
    }
}

/// Returned when a key is outside the valid strand set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStrand(pub String);

impl fmt::Display for UnknownStrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown strand '{}'", self.0)
    }
}

impl std::error::Error for UnknownStrand {}

impl FromStr for Strand {
    type Err = UnknownStrand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Strand::ALL
            .into_iter()
            .find(|strand| strand.key() == s)
            .ok_or_else(|| UnknownStrand(s.to_string()))
    }
}

/// Produces one random question for a single strand.
///
/// Implementations hold no mutable state; all variation comes from `rng`.
pub trait StrandGenerator: Send + Sync {
    fn strand(&self) -> Strand;

    fn generate(&self, rng: &mut dyn RngCore) -> Question;
}

/// Maps strand keys to their generators.
pub struct Curriculum {
    generators: HashMap<Strand, Box<dyn StrandGenerator>>,
}

impl Curriculum {
    /// Registers the full Grade 1 catalog.
    pub fn new() -> Self {
        let mut curriculum = Self {
            generators: HashMap::new(),
        };
        curriculum.register(number::NumberStrand);
        curriculum.register(algebra::AlgebraStrand);
        curriculum.register(spatial::SpatialStrand);
        curriculum.register(data::DataStrand);
        curriculum.register(financial::FinancialStrand);
        curriculum.register(coding::CodingStrand);
        curriculum.register(place_value::PlaceValueStrand);
        curriculum.register(time::TimeStrand);
        curriculum.register(measurement::MeasurementStrand);
        curriculum.register(word_problems::WordProblemStrand);
        curriculum.register(comparing::ComparingStrand);
        curriculum.register(skip_counting::SkipCountingStrand);
        curriculum
    }

    /// An empty catalog; every key resolves to the unknown-strand question.
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self {
            generators: HashMap::new(),
        }
    }

    pub fn register<G: StrandGenerator + 'static>(&mut self, generator: G) {
        self.generators.insert(generator.strand(), Box::new(generator));
    }

    /// Registered strands in menu order.
    pub fn strands(&self) -> Vec<Strand> {
        Strand::ALL
            .into_iter()
            .filter(|strand| self.generators.contains_key(strand))
            .collect()
    }

    /// Generates a question for `key` using the thread-local RNG.
    pub fn generate(&self, key: &str) -> Question {
        self.generate_with(key, &mut rand::rng())
    }

    /// Total over all keys: unknown keys yield [`Question::unknown_strand`].
    pub fn generate_with(&self, key: &str, rng: &mut dyn RngCore) -> Question {
        match key.parse::<Strand>() {
            Ok(strand) => self.generate_strand(strand, rng),
            Err(err) => {
                tracing::debug!("{}", err);
                Question::unknown_strand()
            }
        }
    }

    pub fn generate_strand(&self, strand: Strand, rng: &mut dyn RngCore) -> Question {
        match self.generators.get(&strand) {
            Some(generator) => generator.generate(rng),
            None => Question::unknown_strand(),
        }
    }
}

impl Default for Curriculum {
    fn default() -> Self {
        Self::new()
    }
}
