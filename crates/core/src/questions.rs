use crate::RngState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const DEFAULT_QUESTION_COUNT: usize = 5;
pub const CLASSIC_POSITIONS: [usize; 5] = [0, 9, 25, 32, 51];

/// How quiz positions are chosen when a round enters the quiz phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QuestionPolicy {
    Fixed { positions: Vec<usize> },
    Random { count: usize },
}

impl QuestionPolicy {
    pub fn classic() -> Self {
        Self::Fixed {
            positions: CLASSIC_POSITIONS.to_vec(),
        }
    }
}

impl Default for QuestionPolicy {
    fn default() -> Self {
        Self::Random {
            count: DEFAULT_QUESTION_COUNT,
        }
    }
}

pub fn select_questions(
    policy: &QuestionPolicy,
    deck_size: usize,
    rng: &mut RngState,
) -> Vec<usize> {
    match policy {
        QuestionPolicy::Fixed { positions } => {
            let set: BTreeSet<usize> = positions
                .iter()
                .copied()
                .filter(|pos| *pos < deck_size)
                .collect();
            set.into_iter().collect()
        }
        QuestionPolicy::Random { count } => sample_positions(*count, deck_size, rng),
    }
}

/// Draws `count` distinct positions from `[0, deck_size)`, ascending.
/// Collisions are redrawn; `count` is clamped so the loop always ends.
pub fn sample_positions(count: usize, deck_size: usize, rng: &mut RngState) -> Vec<usize> {
    let count = count.min(deck_size);
    let mut picked = BTreeSet::new();
    while picked.len() < count {
        picked.insert(rng.index(deck_size));
    }
    picked.into_iter().collect()
}
