mod actions;
mod app;
mod input;
mod view;

use anyhow::{Context, Result};
use app::App;
pub use app::UiLocale;
use crossterm::event::{self, Event as CEvent, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, ExecutableCommand};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use sakura_core::RngState;
use std::io::{self, stdout, IsTerminal};
use std::path::PathBuf;
use std::time::Duration;

pub const LANG_ENV: &str = "SAKURA_LANG";

#[derive(Debug, Clone)]
pub struct LaunchOptions {
    pub locale: Option<String>,
    pub seed: Option<u64>,
    pub assets: PathBuf,
    pub root: PathBuf,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            locale: None,
            seed: None,
            assets: PathBuf::from("assets"),
            root: PathBuf::from("."),
        }
    }
}

pub fn run(options: LaunchOptions) -> Result<()> {
    let locale = UiLocale::from_opt(options.locale.as_deref());
    let seed = options
        .seed
        .unwrap_or_else(|| RngState::from_entropy().seed());
    log::info!("starting terminal ui, locale {} seed {seed:#x}", locale.code());
    let mut app = App::bootstrap(locale, seed, &options.assets, &options.root)?;

    ensure_interactive_terminal()?;

    enable_raw_mode().map_err(|err| {
        anyhow::anyhow!(
            "failed to enable raw mode; ensure the process owns an interactive terminal: {err}"
        )
    })?;
    let mut stdout = stdout();
    stdout
        .execute(EnterAlternateScreen)
        .context("enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let run_result = run_loop(&mut terminal, &mut app);
    app.shutdown();
    restore_terminal(&mut terminal)?;
    run_result
}

pub fn run_with_args(args: &[String]) -> Result<()> {
    let options = parse_options(args);
    run(options)
}

fn parse_options(args: &[String]) -> LaunchOptions {
    let mut options = LaunchOptions {
        locale: std::env::var(LANG_ENV).ok(),
        ..LaunchOptions::default()
    };
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
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

fn run_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    let tick_rate = Duration::from_millis(120);
    while !app.should_quit {
        terminal.draw(|frame| view::draw(frame, app))?;
        if event::poll(tick_rate)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.handle_answer_prompt_key(key) {
                    continue;
                }
                let action = input::map_key(key);
                actions::dispatch(app, action);
            }
        }
        app.on_tick();
    }
    Ok(())
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen).context("leave alternate screen")?;
    terminal.show_cursor().context("show cursor")?;
    Ok(())
}

fn ensure_interactive_terminal() -> Result<()> {
    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        return Ok(());
    }
    anyhow::bail!(
        "sakura-cui requires an interactive TTY (run directly in a terminal, not a piped/headless shell)"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn launch_flags_override_defaults() {
        let options = parse_options(&args(&[
            "--lang", "th", "--seed", "12", "--assets", "cfg", "--root", "site",
        ]));
        assert_eq!(options.locale.as_deref(), Some("th"));
        assert_eq!(options.seed, Some(12));
        assert_eq!(options.assets, PathBuf::from("cfg"));
        assert_eq!(options.root, PathBuf::from("site"));
    }

    #[test]
    fn bad_seed_falls_back_to_entropy() {
        let options = parse_options(&args(&["--seed", "abc", "--unknown"]));
        assert_eq!(options.seed, None);
        assert_eq!(options.assets, PathBuf::from("assets"));
    }
}
