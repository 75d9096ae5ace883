use sakura_core::{
    Command, CommandError, GameConfig, Phase, PlaybackStatus, QuestionPolicy, Session,
    SilentMedium, TimerState, DECK_SIZE,
};
use std::time::{Duration, Instant};

fn session(now: Instant) -> Session<SilentMedium> {
    Session::new(GameConfig::default(), 42, SilentMedium::default(), now)
}

fn secs(start: Instant, n: u64) -> Instant {
    start + Duration::from_secs(n)
}

#[test]
fn parses_front_end_actions() {
    assert_eq!(Command::parse("next", None, None), Ok(Command::Advance));
    assert_eq!(Command::parse(" Check ", None, None), Ok(Command::Grade));
    assert_eq!(
        Command::parse("answer", Some(2), Some("QH".to_string())),
        Ok(Command::SetAnswer {
            slot: 2,
            answer: "QH".to_string()
        })
    );
    assert_eq!(
        Command::parse("answer", None, Some("QH".to_string())),
        Err(CommandError::MissingSlot)
    );
    assert_eq!(
        Command::parse("shuffle", None, None),
        Err(CommandError::UnknownAction("shuffle".to_string()))
    );
}

#[test]
fn round_timer_pauses_during_quiz_and_resets_on_restart() {
    let start = Instant::now();
    let mut session = session(start);
    session.apply(Command::Tick, start);
    session.apply(Command::Tick, start);
    assert_eq!(
        session.timers(),
        Some(TimerState {
            round_seconds: 2,
            total_seconds: 2
        })
    );

    for _ in 0..DECK_SIZE {
        session.apply(Command::Advance, start);
    }
    assert_eq!(session.round().phase(), Phase::Quizzing);
    session.apply(Command::Tick, start);
    session.apply(Command::Tick, start);
    let state = session.timers().unwrap_or_default();
    assert_eq!(state.round_seconds, 2);
    assert_eq!(state.total_seconds, 4);

    session.apply(Command::Restart, start);
    let state = session.timers().unwrap_or_default();
    assert_eq!(state.round_seconds, 0);
    assert_eq!(state.total_seconds, 4);
    assert!(session.clock().map(|clock| clock.round_running()).unwrap_or(false));
}

#[test]
fn wall_clock_ticks_follow_the_phase() {
    let start = Instant::now();
    let mut session = session(start);
    session.poll(secs(start, 3));
    for _ in 0..DECK_SIZE {
        session.apply(Command::Advance, secs(start, 3));
    }
    session.poll(secs(start, 10));
    let state = session.timers().unwrap_or_default();
    assert_eq!(state.round_seconds, 3);
    assert_eq!(state.total_seconds, 10);

    session.apply(Command::Restart, secs(start, 10));
    session.poll(secs(start, 12));
    let state = session.timers().unwrap_or_default();
    assert_eq!(state.round_seconds, 2);
    assert_eq!(state.total_seconds, 12);
}

#[test]
fn timer_can_be_switched_off() {
    let start = Instant::now();
    let mut config = GameConfig::default();
    config.timer.enabled = false;
    let mut session = Session::new(config, 1, SilentMedium::default(), start);
    session.apply(Command::Tick, secs(start, 5));
    assert_eq!(session.timers(), None);
    assert!(session.snapshot().round_time.is_none());
}

#[test]
fn snapshot_hides_the_deck_until_the_quiz() {
    let start = Instant::now();
    let mut config = GameConfig::default();
    config.questions = QuestionPolicy::classic();
    let mut session = Session::new(config, 9, SilentMedium::default(), start);
    let snap = session.snapshot();
    assert!(snap.current_card.is_some());
    assert!(snap.choices.is_empty());
    assert_eq!(snap.round_time.as_deref(), Some("00.00.00"));

    for _ in 0..DECK_SIZE {
        session.apply(Command::Advance, start);
    }
    let first = session
        .round()
        .deck()
        .get(0)
        .map(|card| card.asset_name())
        .unwrap_or_default();
    session.apply(
        Command::SetAnswer {
            slot: 0,
            answer: first,
        },
        start,
    );
    session.apply(Command::Grade, start);
    let snap = session.snapshot();
    assert!(snap.current_card.is_none());
    assert_eq!(snap.choices.len(), DECK_SIZE);
    assert_eq!(snap.quiz.len(), 5);
    assert_eq!(snap.results.len(), 5);
    assert!(snap.results[0].passed);
}

#[test]
fn loaded_tracks_start_playing() {
    let start = Instant::now();
    let mut session = session(start);
    session.load_tracks(vec![
        "/music/one.mp3".to_string(),
        "/music/two.mp3".to_string(),
        "/music/three.mp3".to_string(),
    ]);
    let begin = session.playback().index();
    assert_eq!(session.playback().status(), PlaybackStatus::Playing);
    assert_eq!(
        session.playback().medium().track.as_deref(),
        session.playback().current_track()
    );

    session.apply(Command::SkipTrack, start);
    session.apply(Command::SkipTrack, start);
    assert_eq!(session.playback().index(), (begin + 2) % 3);

    session.apply(Command::TogglePlayback, start);
    assert!(session.playback().medium().paused);
    assert_eq!(session.snapshot().music.status, PlaybackStatus::Paused);

    session.shutdown();
    assert!(session.playback().medium().track.is_none());
}

#[test]
fn config_fields_default_when_missing() {
    let config: GameConfig =
        serde_json::from_str(r#"{"questions":{"kind":"fixed","positions":[0,9,25,32,51]}}"#)
            .expect("parse");
    assert_eq!(config.questions, QuestionPolicy::classic());
    assert!(config.timer.enabled);
    assert_eq!(config.server.port, 3000);
    assert_eq!(config.track_reference("a.mp3"), "/music/a.mp3");
}
