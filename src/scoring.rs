use rand::{rngs::StdRng, Rng, SeedableRng};
use std::ops::RangeInclusive;

use crate::session::SessionState;

/// Demo score range used until real form analysis exists
pub const DEMO_SCORE_RANGE: RangeInclusive<u8> = 70..=100;

/// Produces the final form score when a session stops
pub trait FormScorer {
    fn score(&mut self, state: &SessionState) -> u8;
}

/// Placeholder scorer: a uniform random score in [`DEMO_SCORE_RANGE`]
#[derive(Debug)]
pub struct RandomFormScorer {
    rng: StdRng,
}

impl RandomFormScorer {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomFormScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl FormScorer for RandomFormScorer {
    fn score(&mut self, _state: &SessionState) -> u8 {
        self.rng.gen_range(DEMO_SCORE_RANGE)
    }
}

/// Always returns the same score
#[derive(Debug, Clone, Copy)]
pub struct FixedFormScorer(pub u8);

impl FormScorer for FixedFormScorer {
    fn score(&mut self, _state: &SessionState) -> u8 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum FormGrade {
    #[strum(serialize = "Excellent")]
    Excellent,
    #[strum(serialize = "Good")]
    Good,
    #[strum(serialize = "Needs Improvement")]
    NeedsImprovement,
}

impl FormGrade {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => FormGrade::Excellent,
            60..=79 => FormGrade::Good,
            _ => FormGrade::NeedsImprovement,
        }
    }
}
