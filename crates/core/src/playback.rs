use crate::{Event, EventBus, PlaybackStatus};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("playback rejected: {0}")]
    Rejected(String),
    #[error("track unavailable: {0}")]
    Unavailable(String),
}

/// Whatever actually plays audio. Holds at most one track.
pub trait PlaybackMedium {
    fn attach(&mut self, track: &str) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    fn resume(&mut self) -> Result<(), PlaybackError>;
    fn detach(&mut self);
}

/// Medium that accepts everything and plays nothing.
#[derive(Debug, Default, Clone)]
pub struct SilentMedium {
    pub track: Option<String>,
    pub paused: bool,
}

impl PlaybackMedium for SilentMedium {
    fn attach(&mut self, track: &str) -> Result<(), PlaybackError> {
        self.track = Some(track.to_string());
        self.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) -> Result<(), PlaybackError> {
        self.paused = false;
        Ok(())
    }

    fn detach(&mut self) {
        self.track = None;
    }
}

#[derive(Debug)]
pub struct PlaybackController<M> {
    medium: M,
    tracks: Vec<String>,
    index: usize,
    status: PlaybackStatus,
}

impl<M: PlaybackMedium> PlaybackController<M> {
    pub fn new(medium: M) -> Self {
        Self {
            medium,
            tracks: Vec::new(),
            index: 0,
            status: PlaybackStatus::Idle,
        }
    }

    pub fn medium(&self) -> &M {
        &self.medium
    }

    pub fn medium_mut(&mut self) -> &mut M {
        &mut self.medium
    }

    pub fn tracks(&self) -> &[String] {
        &self.tracks
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn current_track(&self) -> Option<&str> {
        self.tracks.get(self.index).map(String::as_str)
    }

    pub fn current_name(&self) -> Option<String> {
        self.current_track().map(track_display_name)
    }

    /// Replaces the playlist. `tracks` is expected to be shuffled already.
    pub fn load(&mut self, tracks: Vec<String>, start: usize, events: &mut EventBus) {
        self.release();
        if tracks.is_empty() {
            self.tracks.clear();
            self.index = 0;
            self.status = PlaybackStatus::Idle;
            log::info!("no music tracks available");
            events.push(Event::PlaylistUnavailable);
            return;
        }
        self.index = start % tracks.len();
        self.tracks = tracks;
        self.status = PlaybackStatus::Playing;
        self.attach_current(events);
    }

    pub fn track_ended(&mut self, events: &mut EventBus) {
        if self.status == PlaybackStatus::Idle {
            return;
        }
        self.move_next(events);
    }

    pub fn skip(&mut self, events: &mut EventBus) {
        if self.status == PlaybackStatus::Idle {
            return;
        }
        self.medium.pause();
        self.move_next(events);
    }

    pub fn toggle(&mut self, events: &mut EventBus) {
        match self.status {
            PlaybackStatus::Idle => {}
            PlaybackStatus::Playing => {
                self.medium.pause();
                self.status = PlaybackStatus::Paused;
                events.push(Event::TrackPaused { index: self.index });
            }
            PlaybackStatus::Paused => {
                if let Err(err) = self.medium.resume() {
                    swallow(err, events);
                }
                self.status = PlaybackStatus::Playing;
                events.push(Event::TrackResumed { index: self.index });
            }
        }
    }

    /// Detaches the active track; used on teardown.
    pub fn release(&mut self) {
        if self.status != PlaybackStatus::Idle {
            self.medium.pause();
            self.medium.detach();
            self.status = PlaybackStatus::Idle;
        }
    }

    fn move_next(&mut self, events: &mut EventBus) {
        self.release();
        self.index = (self.index + 1) % self.tracks.len();
        self.status = PlaybackStatus::Playing;
        self.attach_current(events);
    }

    fn attach_current(&mut self, events: &mut EventBus) {
        let Some(track) = self.tracks.get(self.index) else {
            return;
        };
        if let Err(err) = self.medium.attach(track) {
            swallow(err, events);
        }
        events.push(Event::TrackStarted {
            index: self.index,
            name: track_display_name(track),
        });
    }
}

fn swallow(err: PlaybackError, events: &mut EventBus) {
    log::debug!("playback start failed: {err}");
    events.push(Event::PlaybackBlocked {
        reason: err.to_string(),
    });
}

/// `/music/sakura-night_theme.mp3` -> `sakura night theme`.
pub fn track_display_name(reference: &str) -> String {
    let file = reference.rsplit('/').next().unwrap_or(reference);
    let stem = match file.rfind('.') {
        Some(dot) if dot > 0 => &file[..dot],
        _ => file,
    };
    stem.replace(['-', '_'], " ")
}
