mod editor;
mod lan;

use anyhow::{Context, Result};
use editor::LineEditor;
use sakura_core::{
    format_clock, Card, Command, Event, GradeResult, Phase, RngState, Session, SilentMedium,
};
use sakura_cui::{LaunchOptions, UiLocale, LANG_ENV};
use sakura_data::{load_game_config, track_references};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    cui: bool,
    lan: bool,
    seed: Option<u64>,
    locale: Option<String>,
    assets: PathBuf,
    root: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum LineCommand {
    Game(Command),
    Show,
    Time,
    Help,
    Quit,
}

fn parse_cli_options(args: &[String]) -> CliOptions {
    let mut options = CliOptions {
        cui: false,
        lan: false,
        seed: None,
        locale: std::env::var(LANG_ENV).ok(),
        assets: PathBuf::from("assets"),
        root: PathBuf::from("."),
    };
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "lan" => options.lan = true,
            "--cui" => options.cui = true,
            "--lang" | "-l" => {
                if let Some(value) = args.get(idx + 1) {
                    options.locale = Some(value.clone());
                    idx += 1;
                }
            }
            "--seed" => {
                if let Some(value) = args.get(idx + 1) {
                    options.seed = value.parse::<u64>().ok();
                    idx += 1;
                }
            }
            "--assets" => {
                if let Some(value) = args.get(idx + 1) {
                    options.assets = PathBuf::from(value);
                    idx += 1;
                }
            }
            "--root" => {
                if let Some(value) = args.get(idx + 1) {
                    options.root = PathBuf::from(value);
                    idx += 1;
                }
            }
            _ => {}
        }
        idx += 1;
    }
    options
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_cli_options(&args);
    let result = if options.lan {
        run_lan(&options)
    } else if options.cui {
        sakura_cui::run(LaunchOptions {
            locale: options.locale.clone(),
            seed: options.seed,
            assets: options.assets.clone(),
            root: options.root.clone(),
        })
    } else {
        run_line_mode(&options)
    };
    if let Err(err) = result {
        eprintln!("sakura: {err:#}");
        std::process::exit(1);
    }
}

fn run_lan(options: &CliOptions) -> Result<()> {
    let config = load_game_config(&options.assets)?;
    lan::print_lan_urls(config.server.port).context("list network interfaces")
}

fn run_line_mode(options: &CliOptions) -> Result<()> {
    let locale = UiLocale::from_opt(options.locale.as_deref());
    let config = load_game_config(&options.assets)
        .with_context(|| format!("load config from {}", options.assets.display()))?;
    let seed = options
        .seed
        .unwrap_or_else(|| RngState::from_entropy().seed());
    let tracks = track_references(&config, &options.root);
    let mut session = Session::new(config, seed, SilentMedium::default(), Instant::now());
    session.load_tracks(tracks);
    log::info!("line mode started, seed {seed:#x}");

    println!(
        "{} ({} {seed})",
        locale.text("🌸 Sakura Memory", "🌸 Sakura Memory: ทดสอบความจำไพ่"),
        locale.text("seed", "ซีด")
    );
    println!(
        "{}",
        locale.text(
            "Memorize the deck, then name the quizzed cards. Type help for commands.",
            "จำไพ่ทั้งสำรับ แล้วตอบว่าไพ่ใบที่ถามคือใบอะไร พิมพ์ help เพื่อดูคำสั่ง"
        )
    );
    print_events(locale, &mut session);
    print_lines(&state_lines(locale, &session));

    let mut editor = LineEditor::new();
    while let Some(line) = editor.read_line(&prompt(&session)) {
        session.poll(Instant::now());
        match parse_line(&line) {
            Ok(LineCommand::Quit) => break,
            Ok(LineCommand::Help) => print_help(locale),
            Ok(LineCommand::Time) => print_lines(&time_lines(locale, &session)),
            Ok(LineCommand::Show) => print_lines(&state_lines(locale, &session)),
            Ok(LineCommand::Game(command)) => {
                let shows_state = !matches!(
                    command,
                    Command::TogglePlayback | Command::SkipTrack | Command::SetAnswer { .. }
                );
                session.apply(command, Instant::now());
                print_events(locale, &mut session);
                if shows_state {
                    print_lines(&state_lines(locale, &session));
                }
            }
            Err(err) => println!("{}: {err}", locale.text("error", "ข้อผิดพลาด")),
        }
    }

    print_lines(&time_lines(locale, &session));
    session.shutdown();
    editor.save_history();
    Ok(())
}

fn parse_line(line: &str) -> Result<LineCommand, String> {
    let mut parts = line.split_whitespace();
    let Some(word) = parts.next() else {
        return Ok(LineCommand::Game(Command::Advance));
    };
    let command = match word.to_ascii_lowercase().as_str() {
        "n" | "next" => LineCommand::Game(Command::Advance),
        "p" | "prev" => LineCommand::Game(Command::Retreat),
        "a" | "answer" => {
            let slot = parts
                .next()
                .ok_or_else(|| "usage: answer <question> <card>".to_string())?
                .parse::<usize>()
                .ok()
                .and_then(|slot| slot.checked_sub(1))
                .ok_or_else(|| "question numbers start at 1".to_string())?;
            let typed = parts.collect::<Vec<_>>().join(" ");
            if typed.is_empty() {
                return Err("missing card, e.g. answer 1 10h".to_string());
            }
            let answer = Card::parse(&typed)
                .map(|card| card.identifier())
                .unwrap_or(typed);
            LineCommand::Game(Command::SetAnswer { slot, answer })
        }
        "c" | "check" => LineCommand::Game(Command::Grade),
        "r" | "restart" => LineCommand::Game(Command::Restart),
        "m" | "music" => LineCommand::Game(Command::TogglePlayback),
        "s" | "skip" => LineCommand::Game(Command::SkipTrack),
        "t" | "time" => LineCommand::Time,
        "state" => LineCommand::Show,
        "?" | "h" | "help" => LineCommand::Help,
        "q" | "quit" | "exit" => LineCommand::Quit,
        other => return Err(format!("unknown command '{other}'")),
    };
    Ok(command)
}

fn prompt(session: &Session<SilentMedium>) -> String {
    let round = session.round();
    match round.phase() {
        Phase::Revealing => format!("[{}/{}] > ", round.current_index() + 1, round.deck().len()),
        Phase::Quizzing => "[quiz] > ".to_string(),
    }
}

fn state_lines(locale: UiLocale, session: &Session<SilentMedium>) -> Vec<String> {
    let round = session.round();
    if round.phase() == Phase::Revealing {
        let card = round
            .current_card()
            .map(|card| card.identifier())
            .unwrap_or_else(|| "-".to_string());
        return vec![format!(
            "{} {} / {}: {card}",
            locale.text("Card", "ใบที่"),
            round.current_index() + 1,
            round.deck().len()
        )];
    }
    let results = round.results();
    let mut lines = vec![locale
        .text("📝 Memory quiz", "📝 ตอบคำถามความจำ")
        .to_string()];
    for (slot, (position, answer)) in round
        .quiz_positions()
        .iter()
        .zip(round.answers())
        .enumerate()
    {
        let shown = if answer.is_empty() { "-" } else { answer.as_str() };
        let verdict = results
            .iter()
            .find(|result| result.slot == slot)
            .map(|result| verdict(locale, result))
            .unwrap_or_default();
        lines.push(format!(
            "  {}. {} {}: {shown} {verdict}",
            slot + 1,
            locale.text("card", "ไพ่ใบที่"),
            position + 1
        ));
    }
    lines
}

fn verdict(locale: UiLocale, result: &GradeResult) -> String {
    if result.passed {
        locale.text("✅ correct", "✅ ถูกต้อง").to_string()
    } else {
        format!(
            "{} {})",
            locale.text("❌ wrong (answer:", "❌ ผิด (คำตอบที่ถูกคือ:"),
            result.correct
        )
    }
}

fn time_lines(locale: UiLocale, session: &Session<SilentMedium>) -> Vec<String> {
    let Some(state) = session.timers() else {
        return vec![locale.text("timer is off", "ปิดการจับเวลา").to_string()];
    };
    vec![
        format!(
            "{}: {}",
            locale.text("Round time", "เวลาในรอบปัจจุบัน"),
            format_clock(state.round_seconds)
        ),
        format!(
            "{}: {}",
            locale.text("Total time", "เวลาเล่นทั้งหมด"),
            format_clock(state.total_seconds)
        ),
    ]
}

fn event_line(locale: UiLocale, event: &Event) -> Option<String> {
    let line = match event {
        Event::QuizStarted { positions } => format!(
            "{} {}",
            locale.text("Quiz on cards", "ทดสอบไพ่ใบที่"),
            positions
                .iter()
                .map(|pos| (pos + 1).to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ),
        Event::Graded { passed, total } => {
            format!("{} {passed}/{total}", locale.text("Score", "คะแนน"))
        }
        Event::RoundRestarted => locale.text("New round", "เริ่มรอบใหม่").to_string(),
        Event::TrackStarted { name, .. } => format!(
            "♪ {}: {name}",
            locale.text("Now playing", "ตอนนี้กำลังเล่น")
        ),
        Event::TrackPaused { .. } => locale.text("♪ paused", "♪ หยุดเพลง").to_string(),
        Event::TrackResumed { .. } => locale.text("♪ resumed", "♪ เล่นเพลง").to_string(),
        Event::PlaylistUnavailable => locale.text("♪ no music found", "♪ ไม่พบเพลง").to_string(),
        Event::PlaybackBlocked { reason } => format!("♪ {reason}"),
        Event::CardFlipped { .. } | Event::PhaseChanged { .. } | Event::AnswerSet { .. } => {
            return None
        }
    };
    Some(line)
}

fn print_events(locale: UiLocale, session: &mut Session<SilentMedium>) {
    for event in session.drain_events() {
        if let Some(line) = event_line(locale, &event) {
            println!("{line}");
        }
    }
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn print_help(locale: UiLocale) {
    let lines = [
        locale.text(
            "enter | n | next next card",
            "enter | n | next ไพ่ใบถัดไป",
        ),
        locale.text("p | prev         previous card", "p | prev         ไพ่ใบก่อนหน้า"),
        locale.text(
            "a | answer <q> <card>  answer question q (e.g. answer 1 10h)",
            "a | answer <q> <ไพ่>  ตอบคำถามข้อ q (เช่น answer 1 10h)",
        ),
        locale.text("c | check        check answers", "c | check        ตรวจคำตอบ"),
        locale.text("r | restart      new round", "r | restart      เริ่มใหม่"),
        locale.text("t | time         show timers", "t | time         แสดงเวลา"),
        locale.text("m | music        play/pause music", "m | music        เล่น/หยุดเพลง"),
        locale.text("s | skip         next track", "s | skip         เพลงถัดไป"),
        locale.text("state            show the board", "state            แสดงสถานะ"),
        locale.text("q | quit         leave", "q | quit         ออก"),
    ];
    for line in lines {
        println!("  {line}");
    }
}
