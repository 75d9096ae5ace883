use crate::Phase;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    /// Flip sound cue.
    CardFlipped { index: usize },
    PhaseChanged { phase: Phase },
    QuizStarted { positions: Vec<usize> },
    AnswerSet { slot: usize },
    Graded { passed: usize, total: usize },
    RoundRestarted,
    TrackStarted { index: usize, name: String },
    TrackPaused { index: usize },
    TrackResumed { index: usize },
    PlaylistUnavailable,
    PlaybackBlocked { reason: String },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
