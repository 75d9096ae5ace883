use crate::{
    format_clock, Card, Deck, Event, EventBus, GameConfig, GradeResult, Phase, PlaybackController,
    PlaybackMedium, PlaybackStatus, RngState, Round, SessionClock, TimerState,
};
use serde::Serialize;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown action: {0}")]
    UnknownAction(String),
    #[error("missing answer slot")]
    MissingSlot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Advance,
    Retreat,
    SetAnswer { slot: usize, answer: String },
    Grade,
    Restart,
    Tick,
    TogglePlayback,
    SkipTrack,
    TrackEnded,
}

impl Command {
    pub fn parse(
        action: &str,
        slot: Option<usize>,
        value: Option<String>,
    ) -> Result<Self, CommandError> {
        let command = match action.trim().to_ascii_lowercase().as_str() {
            "next" | "advance" => Self::Advance,
            "prev" | "retreat" => Self::Retreat,
            "answer" => Self::SetAnswer {
                slot: slot.ok_or(CommandError::MissingSlot)?,
                answer: value.unwrap_or_default(),
            },
            "check" | "grade" => Self::Grade,
            "restart" => Self::Restart,
            "tick" => Self::Tick,
            "toggle_music" | "toggle" => Self::TogglePlayback,
            "skip_music" | "skip" => Self::SkipTrack,
            "track_ended" => Self::TrackEnded,
            other => return Err(CommandError::UnknownAction(other.to_string())),
        };
        Ok(command)
    }
}

/// A player's session: the current round, its clock and the music.
#[derive(Debug)]
pub struct Session<M> {
    config: GameConfig,
    rng: RngState,
    round: Round,
    clock: Option<SessionClock>,
    playback: PlaybackController<M>,
    events: EventBus,
}

impl<M: PlaybackMedium> Session<M> {
    pub fn new(config: GameConfig, seed: u64, medium: M, now: Instant) -> Self {
        let mut rng = RngState::from_seed(seed);
        let round = Round::new(config.questions.clone(), &mut rng);
        Self::from_parts(config, rng, round, medium, now)
    }

    /// Builds a session around an existing round, e.g. a prepared deck.
    pub fn from_parts(
        config: GameConfig,
        rng: RngState,
        round: Round,
        medium: M,
        now: Instant,
    ) -> Self {
        let clock = config
            .timer
            .enabled
            .then(|| SessionClock::start(config.timer.period(), now));
        log::info!(
            "session started (seed {:#x}, timer {})",
            rng.seed(),
            if clock.is_some() { "on" } else { "off" }
        );
        Self {
            config,
            rng,
            round,
            clock,
            playback: PlaybackController::new(medium),
            events: EventBus::default(),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn clock(&self) -> Option<&SessionClock> {
        self.clock.as_ref()
    }

    pub fn playback(&self) -> &PlaybackController<M> {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut PlaybackController<M> {
        &mut self.playback
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.events.drain().collect()
    }

    pub fn apply(&mut self, command: Command, now: Instant) {
        self.poll(now);
        match command {
            Command::Advance => self.round.advance(&mut self.rng, &mut self.events),
            Command::Retreat => self.round.retreat(&mut self.events),
            Command::SetAnswer { slot, answer } => {
                self.round.set_answer(slot, answer, &mut self.events)
            }
            Command::Grade => {
                self.round.grade(&mut self.events);
            }
            Command::Restart => {
                self.round.restart(&mut self.rng, &mut self.events);
                if let Some(clock) = self.clock.as_mut() {
                    clock.reset_round(now);
                }
            }
            Command::Tick => {
                if let Some(clock) = self.clock.as_mut() {
                    clock.tick();
                }
            }
            Command::TogglePlayback => self.playback.toggle(&mut self.events),
            Command::SkipTrack => self.playback.skip(&mut self.events),
            Command::TrackEnded => self.playback.track_ended(&mut self.events),
        }
        let phase = self.round.phase();
        if let Some(clock) = self.clock.as_mut() {
            clock.observe_phase(phase, now);
        }
    }

    /// Applies timer ticks that fell due up to `now`.
    pub fn poll(&mut self, now: Instant) {
        if let Some(clock) = self.clock.as_mut() {
            clock.catch_up(now);
        }
    }

    /// Shuffles the fetched track references and starts at a random one.
    pub fn load_tracks(&mut self, mut tracks: Vec<String>) {
        self.rng.shuffle(&mut tracks);
        let start = if tracks.is_empty() {
            0
        } else {
            self.rng.index(tracks.len())
        };
        self.playback.load(tracks, start, &mut self.events);
    }

    pub fn shutdown(&mut self) {
        if let Some(clock) = self.clock.as_mut() {
            clock.shutdown();
        }
        self.playback.release();
        log::info!("session closed");
    }

    pub fn timers(&self) -> Option<TimerState> {
        self.clock.as_ref().map(SessionClock::state)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let round = &self.round;
        let current = match round.phase() {
            Phase::Revealing => round.current_card().copied(),
            Phase::Quizzing => None,
        };
        let quiz = round
            .quiz_positions()
            .iter()
            .zip(round.answers())
            .enumerate()
            .map(|(slot, (&position, answer))| QuizSlot {
                slot,
                position,
                answer: answer.clone(),
            })
            .collect();
        SessionSnapshot {
            seed: self.seed(),
            phase: round.phase(),
            current_index: round.current_index(),
            deck_len: round.deck().len(),
            current_card: current.as_ref().map(CardView::from),
            choices: match round.phase() {
                Phase::Quizzing => Deck::standard52().iter().map(CardView::from).collect(),
                Phase::Revealing => Vec::new(),
            },
            quiz,
            results: round.results().iter().map(ResultView::from).collect(),
            round_time: self.timers().map(|state| format_clock(state.round_seconds)),
            total_time: self.timers().map(|state| format_clock(state.total_seconds)),
            music: MusicSnapshot {
                status: self.playback.status(),
                track: self.playback.current_track().map(str::to_string),
                name: self.playback.current_name(),
                index: self.playback.index(),
                tracks: self.playback.tracks().len(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizSlot {
    pub slot: usize,
    pub position: usize,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardView {
    pub identifier: String,
    pub asset: String,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        Self {
            identifier: card.identifier(),
            asset: card.asset_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ResultView {
    pub slot: usize,
    pub position: usize,
    pub passed: bool,
    pub correct: CardView,
}

impl From<&GradeResult> for ResultView {
    fn from(result: &GradeResult) -> Self {
        Self {
            slot: result.slot,
            position: result.position,
            passed: result.passed,
            correct: CardView::from(&result.correct),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MusicSnapshot {
    pub status: PlaybackStatus,
    pub track: Option<String>,
    pub name: Option<String>,
    pub index: usize,
    pub tracks: usize,
}

/// Front-end view of a session. Only the face-up card is exposed; during the
/// quiz the answer choices are listed in standard order.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub seed: u64,
    pub phase: Phase,
    pub current_index: usize,
    pub deck_len: usize,
    pub current_card: Option<CardView>,
    pub choices: Vec<CardView>,
    pub quiz: Vec<QuizSlot>,
    pub results: Vec<ResultView>,
    pub round_time: Option<String>,
    pub total_time: Option<String>,
    pub music: MusicSnapshot,
}
