use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use sakura_core::{
    format_clock, Card, Command, Event, GradeResult, Phase, PlaybackStatus, Session, SilentMedium,
};
use sakura_data::{load_game_config, normalize_locale, track_references};
use std::collections::VecDeque;
use std::path::Path;
use std::time::Instant;

const MAX_EVENT_LOG: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiLocale {
    EnUs,
    Th,
}

impl UiLocale {
    pub fn from_opt(value: Option<&str>) -> Self {
        let normalized = normalize_locale(value);
        if normalized == "th_TH" {
            Self::Th
        } else {
            Self::EnUs
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::EnUs => "en_US",
            Self::Th => "th_TH",
        }
    }

    pub fn text<'a>(self, en: &'a str, th: &'a str) -> &'a str {
        if matches!(self, Self::Th) {
            th
        } else {
            en
        }
    }
}

pub struct App {
    pub locale: UiLocale,
    pub session: Session<SilentMedium>,
    pub quiz_cursor: usize,
    pub answer_input: Option<String>,
    pub event_log: VecDeque<String>,
    pub status_line: String,
    pub show_help: bool,
    pub should_quit: bool,
}

impl App {
    pub fn bootstrap(locale: UiLocale, seed: u64, assets: &Path, root: &Path) -> Result<Self> {
        let config = load_game_config(assets)
            .with_context(|| format!("load config from {}", assets.display()))?;
        let tracks = track_references(&config, root);
        let session = Session::new(config, seed, SilentMedium::default(), Instant::now());
        Ok(Self::with_session(locale, session, tracks))
    }

    pub fn with_session(
        locale: UiLocale,
        mut session: Session<SilentMedium>,
        tracks: Vec<String>,
    ) -> Self {
        session.load_tracks(tracks);
        let mut app = Self {
            locale,
            session,
            quiz_cursor: 0,
            answer_input: None,
            event_log: VecDeque::new(),
            status_line: locale.text("ready", "พร้อม").to_string(),
            show_help: false,
            should_quit: false,
        };
        app.push_event_line(format!(
            "{} {:#x}",
            locale.text("seed", "ซีด"),
            app.session.seed()
        ));
        app.flush_events();
        app
    }

    pub fn on_tick(&mut self) {
        self.session.poll(Instant::now());
    }

    pub fn apply(&mut self, command: Command) {
        self.session.apply(command, Instant::now());
        self.flush_events();
    }

    pub fn phase(&self) -> Phase {
        self.session.round().phase()
    }

    pub fn activate_primary(&mut self) {
        match self.phase() {
            Phase::Revealing => self.apply(Command::Advance),
            Phase::Quizzing => self.open_answer_prompt(),
        }
    }

    pub fn move_cursor(&mut self, down: bool) {
        let len = self.session.round().quiz_positions().len();
        move_index(&mut self.quiz_cursor, len, down);
    }

    pub fn open_answer_prompt(&mut self) {
        if self.phase() != Phase::Quizzing {
            return;
        }
        let current = self
            .session
            .round()
            .answers()
            .get(self.quiz_cursor)
            .cloned()
            .unwrap_or_default();
        self.answer_input = Some(current);
    }

    /// Returns true when the key was consumed by the answer prompt.
    pub fn handle_answer_prompt_key(&mut self, key: KeyEvent) -> bool {
        let Some(input) = self.answer_input.as_mut() else {
            return false;
        };
        match key.code {
            KeyCode::Esc => {
                self.answer_input = None;
            }
            KeyCode::Enter => {
                let value = self.answer_input.take().unwrap_or_default();
                self.submit_answer(value);
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(ch) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    input.push(ch);
                }
            }
            _ => {}
        }
        true
    }

    fn submit_answer(&mut self, value: String) {
        let slot = self.quiz_cursor;
        let answer = match Card::parse(&value) {
            Some(card) => card.identifier(),
            None => {
                self.push_status(format!(
                    "{}: {}",
                    self.locale.text("not a card", "ไม่ใช่ไพ่"),
                    value.trim()
                ));
                value.trim().to_string()
            }
        };
        self.apply(Command::SetAnswer { slot, answer });
        self.move_cursor(true);
    }

    pub fn restart(&mut self) {
        self.quiz_cursor = 0;
        self.answer_input = None;
        self.apply(Command::Restart);
    }

    pub fn shutdown(&mut self) {
        self.session.shutdown();
    }

    pub fn next_hint(&self) -> String {
        match self.phase() {
            Phase::Revealing => self
                .locale
                .text("memorize, then →", "จำไพ่ แล้วกด →")
                .to_string(),
            Phase::Quizzing if self.session.round().results().is_empty() => self
                .locale
                .text("enter answers, c to check", "ใส่คำตอบ แล้วกด c ตรวจคำตอบ")
                .to_string(),
            Phase::Quizzing => self
                .locale
                .text("r to restart", "กด r เพื่อเริ่มใหม่")
                .to_string(),
        }
    }

    pub fn position_label(&self) -> String {
        let round = self.session.round();
        format!(
            "{} {} / {}",
            self.locale.text("Card", "ใบที่"),
            round.current_index() + 1,
            round.deck().len()
        )
    }

    pub fn timer_lines(&self) -> Vec<String> {
        let Some(state) = self.session.timers() else {
            return Vec::new();
        };
        vec![
            format!(
                "{}: {}",
                self.locale.text("Round time", "เวลาในรอบปัจจุบัน"),
                format_clock(state.round_seconds)
            ),
            format!(
                "{}: {}",
                self.locale.text("Total time", "เวลาเล่นทั้งหมด"),
                format_clock(state.total_seconds)
            ),
        ]
    }

    pub fn quiz_rows(&self) -> Vec<String> {
        let round = self.session.round();
        let results = round.results();
        round
            .quiz_positions()
            .iter()
            .zip(round.answers())
            .enumerate()
            .map(|(slot, (position, answer))| {
                let shown = if answer.is_empty() { "-" } else { answer.as_str() };
                let verdict = results
                    .iter()
                    .find(|result| result.slot == slot)
                    .map(|result| self.result_label(result))
                    .unwrap_or_default();
                format!(
                    "{} {:>2}: {:<4} {}",
                    self.locale.text("Card", "ไพ่ใบที่"),
                    position + 1,
                    shown,
                    verdict
                )
            })
            .collect()
    }

    fn result_label(&self, result: &GradeResult) -> String {
        if result.passed {
            self.locale.text("✅ correct", "✅ ถูกต้อง").to_string()
        } else {
            format!(
                "{} {})",
                self.locale.text("❌ wrong (answer:", "❌ ผิด (คำตอบที่ถูกคือ:"),
                result.correct
            )
        }
    }

    pub fn music_line(&self) -> String {
        let playback = self.session.playback();
        let name = playback
            .current_name()
            .unwrap_or_else(|| self.locale.text("no music", "ไม่มีเพลง").to_string());
        let status = match playback.status() {
            PlaybackStatus::Idle => "■",
            PlaybackStatus::Playing => "▶",
            PlaybackStatus::Paused => "⏸",
        };
        format!(
            "{status} {}: {name}",
            self.locale.text("Now playing", "ตอนนี้กำลังเล่น")
        )
    }

    pub fn push_status(&mut self, value: impl Into<String>) {
        self.status_line = value.into();
    }

    fn flush_events(&mut self) {
        let drained = self.session.drain_events();
        for event in drained {
            if let Some(line) = format_event(self.locale, &event) {
                self.push_event_line(line);
            }
        }
    }

    fn push_event_line(&mut self, line: String) {
        if self.event_log.len() >= MAX_EVENT_LOG {
            let _ = self.event_log.pop_front();
        }
        self.event_log.push_back(line);
    }
}

fn format_event(locale: UiLocale, event: &Event) -> Option<String> {
    let line = match event {
        Event::CardFlipped { .. } | Event::AnswerSet { .. } | Event::PhaseChanged { .. } => {
            return None
        }
        Event::QuizStarted { positions } => format!(
            "{} {:?}",
            locale.text("quiz on cards", "ทดสอบไพ่ใบที่"),
            positions.iter().map(|pos| pos + 1).collect::<Vec<_>>()
        ),
        Event::Graded { passed, total } => {
            format!("{} {passed}/{total}", locale.text("score", "คะแนน"))
        }
        Event::RoundRestarted => locale.text("new round", "เริ่มรอบใหม่").to_string(),
        Event::TrackStarted { name, .. } => format!("♪ {name}"),
        Event::TrackPaused { .. } => locale.text("music paused", "หยุดเพลง").to_string(),
        Event::TrackResumed { .. } => locale.text("music resumed", "เล่นเพลง").to_string(),
        Event::PlaylistUnavailable => locale.text("no music found", "ไม่พบเพลง").to_string(),
        Event::PlaybackBlocked { reason } => format!("♪ {reason}"),
    };
    Some(line)
}

fn move_index(value: &mut usize, len: usize, down: bool) {
    if len == 0 {
        *value = 0;
        return;
    }
    if down {
        *value = (*value + 1) % len;
    } else if *value == 0 {
        *value = len - 1;
    } else {
        *value -= 1;
    }
}
