//! duel_tui - Hot-seat terminal duels on top of duel_core
//!
//! Usage: duel_tui [--config <duel.toml>] [--roster <roster.toml>]
//!
//! Logs go to `duel_tui.log` in the working directory; set `RUST_LOG` to
//! change the filter (default `info`).

mod app;
mod simulation;
mod ui;

use app::{App, Screen, Seat};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use duel_core::config::ConfigError;
use duel_core::{default_config, default_roster, load_config, load_roster, Action};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "duel_tui.log";

#[derive(Error, Debug)]
enum AppError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("Terminal error: {0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Usage(String),
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    roster: Option<PathBuf>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, AppError> {
        let mut parsed = Args::default();
        while let Some(arg) = args.next() {
            let slot = match arg.as_str() {
                "--config" => &mut parsed.config,
                "--roster" => &mut parsed.roster,
                other => return Err(AppError::Usage(format!("Unknown argument: {}", other))),
            };
            let value = args
                .next()
                .ok_or_else(|| AppError::Usage(format!("{} needs a path", arg)))?;
            *slot = Some(PathBuf::from(value));
        }
        Ok(parsed)
    }
}

fn init_logging() -> Result<(), AppError> {
    let file = std::fs::File::create(LOG_FILE)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn build_app(args: &Args) -> Result<App, AppError> {
    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => default_config(),
    };
    let roster = match &args.roster {
        Some(path) => load_roster(path)?,
        None => default_roster(),
    };
    if roster.len() < 2 {
        return Err(AppError::Usage("The roster needs at least two characters".to_string()));
    }
    tracing::info!(characters = roster.len(), seed = ?config.rng.seed, "loaded roster and config");
    Ok(App::new(roster, config))
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let args = Args::parse(std::env::args().skip(1))?;
    init_logging()?;

    // Create app before terminal setup so config errors are visible
    let mut app = build_app(&args)?;

    // Setup terminal
    if let Err(e) = enable_raw_mode() {
        eprintln!("This game requires a terminal. Run it directly, not piped or in a non-TTY context.");
        return Err(e.into());
    }

    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e.into());
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = match Terminal::new(backend) {
        Ok(t) => t,
        Err(e) => {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
    };

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), AppError> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match (key.code, key.modifiers) {
                    (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                        break
                    }
                    (KeyCode::Char('?'), _) => app.toggle_help(),
                    (KeyCode::Up, _) => app.on_up(),
                    (KeyCode::Down, _) => app.on_down(),
                    (code, _) => match app.screen {
                        Screen::Select => match code {
                            KeyCode::Tab => app.switch_seat(),
                            KeyCode::Enter => app.start(),
                            KeyCode::Char('r') => app.rematch(),
                            KeyCode::Char('s') => app.simulate(),
                            _ => {}
                        },
                        Screen::Battle => match code {
                            KeyCode::Char('a') => app.declare(Seat::One, Action::Attack),
                            KeyCode::Char('d') => app.declare(Seat::One, Action::Defend),
                            KeyCode::Char('e') => app.declare(Seat::One, Action::Evade),
                            KeyCode::Char('j') => app.declare(Seat::Two, Action::Attack),
                            KeyCode::Char('k') => app.declare(Seat::Two, Action::Defend),
                            KeyCode::Char('l') => app.declare(Seat::Two, Action::Evade),
                            _ => {}
                        },
                    },
                }
            }
        }

        // Resolve rounds past their deadline
        app.tick();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args, AppError> {
        Args::parse(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_args() {
        let parsed = args(&["--config", "a.toml", "--roster", "b.toml"]).unwrap();
        assert_eq!(parsed.config, Some(PathBuf::from("a.toml")));
        assert_eq!(parsed.roster, Some(PathBuf::from("b.toml")));

        let empty = args(&[]).unwrap();
        assert!(empty.config.is_none() && empty.roster.is_none());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(matches!(args(&["--config"]), Err(AppError::Usage(_))));
        assert!(matches!(args(&["--verbose"]), Err(AppError::Usage(_))));
    }

    #[test]
    fn test_build_app_defaults() {
        let app = build_app(&Args::default()).unwrap();
        assert_eq!(app.screen, Screen::Select);
        assert!(app.characters.len() >= 2);
    }
}
