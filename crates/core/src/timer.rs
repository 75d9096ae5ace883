use crate::{Phase, TimerState};
use std::time::{Duration, Instant};

pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// A running periodic source. Dropping it cancels it.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    next_due: Instant,
}

impl Interval {
    pub fn start(period: Duration, now: Instant) -> Self {
        Self {
            period,
            next_due: now + period,
        }
    }

    /// Number of periods elapsed by `now`; consumes them.
    pub fn due_ticks(&mut self, now: Instant) -> u64 {
        if self.period.is_zero() {
            return 0;
        }
        if now < self.next_due {
            return 0;
        }
        let period = self.period.as_nanos();
        let ticks = (now - self.next_due).as_nanos() / period + 1;
        self.next_due += Duration::from_nanos(u64::try_from(period * ticks).unwrap_or(u64::MAX));
        u64::try_from(ticks).unwrap_or(u64::MAX)
    }
}

/// Round and total counters tied to the round phase.
///
/// The total source starts once and lives until [`SessionClock::shutdown`].
/// The round source only exists while the round is revealing cards.
#[derive(Debug, Clone)]
pub struct SessionClock {
    period: Duration,
    state: TimerState,
    total: Option<Interval>,
    round: Option<Interval>,
}

impl SessionClock {
    pub fn start(period: Duration, now: Instant) -> Self {
        Self {
            period,
            state: TimerState::default(),
            total: Some(Interval::start(period, now)),
            round: Some(Interval::start(period, now)),
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn round_running(&self) -> bool {
        self.round.is_some()
    }

    pub fn total_running(&self) -> bool {
        self.total.is_some()
    }

    /// Starts or cancels the round source to match `phase`.
    pub fn observe_phase(&mut self, phase: Phase, now: Instant) {
        match (phase, self.round.is_some()) {
            (Phase::Revealing, false) if self.total.is_some() => {
                self.round = Some(Interval::start(self.period, now));
            }
            (Phase::Quizzing, true) => {
                self.round = None;
            }
            _ => {}
        }
    }

    /// Zeroes the round counter and restarts its source.
    pub fn reset_round(&mut self, now: Instant) {
        self.state.round_seconds = 0;
        if self.total.is_some() {
            self.round = Some(Interval::start(self.period, now));
        }
    }

    /// One tick on every active source.
    pub fn tick(&mut self) {
        if self.total.is_some() {
            self.state.total_seconds += 1;
        }
        if self.round.is_some() {
            self.state.round_seconds += 1;
        }
    }

    /// Applies every tick that fell due up to `now`.
    pub fn catch_up(&mut self, now: Instant) {
        if let Some(total) = self.total.as_mut() {
            self.state.total_seconds += total.due_ticks(now);
        }
        if let Some(round) = self.round.as_mut() {
            self.state.round_seconds += round.due_ticks(now);
        }
    }

    pub fn shutdown(&mut self) {
        self.total = None;
        self.round = None;
    }
}

/// `HH.MM.SS`, hours are not wrapped at 24.
pub fn format_clock(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours:02}.{minutes:02}.{seconds:02}")
}
