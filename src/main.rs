//! Terminal geography quiz (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `term`; the quiz
//! itself runs in the engine and is advanced on a fixed tick.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

use tui_geoquiz::core::BADGES;
use tui_geoquiz::engine::{load_catalog, JsonStore, Quiz, QuizConfig};
use tui_geoquiz::input::{is_interrupt, nav_input, play_input, should_quit, to_command, NavInput, PlayInput};
use tui_geoquiz::term::screen::toast_for;
use tui_geoquiz::term::{
    AppState, FrameBuffer, MenuItem, QuizView, Screen, TerminalRenderer, ViewContext, Viewport,
};
use tui_geoquiz::types::{Difficulty, QuizCommand, QuizEvent, QuizMode, SessionSummary, TICK_MS};

type GeoQuiz = Quiz<JsonStore, Vec<QuizEvent>>;

#[derive(Debug, Parser)]
#[command(name = "tui-geoquiz", version, about = "Terminal geography quiz")]
struct Cli {
    /// Difficulty preselected in the menu
    #[arg(long, value_parser = parse_difficulty, default_value = "easy")]
    difficulty: Difficulty,

    /// Quiz mode preselected in the menu (flag, description, capital)
    #[arg(long, value_parser = parse_mode, default_value = "flag")]
    mode: QuizMode,

    /// Seed for question order (overrides GEOQUIZ_SEED)
    #[arg(long)]
    seed: Option<u32>,

    /// Directory for saved progress, settings and the log (overrides GEOQUIZ_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// JSON country catalog to use instead of the bundled one (overrides GEOQUIZ_CATALOG)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
    Difficulty::from_str(s).ok_or_else(|| format!("unknown difficulty '{s}' (easy, medium, hard)"))
}

fn parse_mode(s: &str) -> Result<QuizMode, String> {
    QuizMode::from_str(s).ok_or_else(|| format!("unknown mode '{s}' (flag, description, capital)"))
}

enum Flow {
    Continue,
    Quit,
}

/// Front-end state plus the summary waiting behind a finished session.
struct App {
    state: AppState,
    summary: Option<SessionSummary>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = QuizConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(path) = cli.catalog {
        config.catalog_path = Some(path);
    }

    init_logging(&config, cli.verbose)?;
    info!(data_dir = %config.data_dir.display(), seed = config.seed, "starting");

    let catalog = load_catalog(config.catalog_path.as_deref())?;
    let store = JsonStore::new(&config.data_dir);
    let mut quiz = Quiz::new(Arc::new(catalog), store, Vec::new(), config.seed);
    let mut app = App {
        state: AppState::new(cli.difficulty, cli.mode),
        summary: None,
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut quiz, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();

    if quiz.session().active() {
        quiz.handle(QuizCommand::Abandon);
    }
    info!("exiting");
    result
}

fn init_logging(config: &QuizConfig, verbose: bool) -> Result<()> {
    fs::create_dir_all(&config.data_dir).with_context(|| {
        format!("Failed to create data directory: {}", config.data_dir.display())
    })?;
    let log_path = config.log_path();
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, quiz: &mut GeoQuiz, app: &mut App) -> Result<()> {
    let view = QuizView::new();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let snapshot = quiz.snapshot();
        let ctx = ViewContext {
            catalog: quiz.catalog(),
            snapshot: &snapshot,
            progress: quiz.progress(),
            settings: quiz.settings(),
        };
        view.render_into(&mut fb, &app.state, &ctx, Viewport::new(w, h));
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if is_interrupt(key) {
                        return Ok(());
                    }
                    let flow = handle_key(app, quiz, key);
                    drain_events(app, quiz);
                    if let Flow::Quit = flow {
                        return Ok(());
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            quiz.tick(TICK_MS);
            app.state.toasts.tick(TICK_MS);
            drain_events(app, quiz);
        }
    }
}

/// Turn quiz notifications into toasts and remember the final summary.
fn drain_events(app: &mut App, quiz: &mut GeoQuiz) {
    for event in std::mem::take(quiz.notifier_mut()) {
        if let Some(text) = toast_for(&event) {
            app.state.toasts.push(text);
        }
        if let QuizEvent::SessionEnded(summary) = event {
            app.summary = Some(summary);
        }
    }
}

fn handle_key(app: &mut App, quiz: &mut GeoQuiz, key: KeyEvent) -> Flow {
    match app.state.screen {
        Screen::Menu => handle_menu_key(app, quiz, key),
        Screen::Play => handle_play_key(app, quiz, key),
        Screen::Summary(_) => {
            if should_quit(key) {
                return Flow::Quit;
            }
            match nav_input(key) {
                Some(NavInput::Select) => {
                    quiz.handle(app.state.menu.start_command());
                    app.state.screen = Screen::Play;
                }
                Some(NavInput::Back) => app.state.screen = Screen::Menu,
                _ => {}
            }
            Flow::Continue
        }
        Screen::Badges => {
            if should_quit(key) {
                return Flow::Quit;
            }
            match nav_input(key) {
                Some(NavInput::Up) => {
                    app.state.badge_scroll = app.state.badge_scroll.saturating_sub(1);
                }
                Some(NavInput::Down) => {
                    app.state.badge_scroll = (app.state.badge_scroll + 1).min(BADGES.len() - 1);
                }
                Some(NavInput::Back | NavInput::Select) => app.state.screen = Screen::Menu,
                _ => {}
            }
            Flow::Continue
        }
        Screen::Learn => {
            handle_learn_key(app, quiz, key);
            Flow::Continue
        }
        Screen::Settings => {
            if should_quit(key) {
                return Flow::Quit;
            }
            let settings = &mut app.state.settings;
            match nav_input(key) {
                Some(NavInput::Up) => settings.move_cursor(false),
                Some(NavInput::Down) => settings.move_cursor(true),
                Some(NavInput::Left) => {
                    quiz.handle(settings.adjust(quiz.settings(), false));
                }
                Some(NavInput::Right | NavInput::Select) => {
                    quiz.handle(settings.adjust(quiz.settings(), true));
                }
                Some(NavInput::Back) => app.state.screen = Screen::Menu,
                _ => {}
            }
            Flow::Continue
        }
    }
}

fn handle_menu_key(app: &mut App, quiz: &mut GeoQuiz, key: KeyEvent) -> Flow {
    if should_quit(key) {
        return Flow::Quit;
    }
    let menu = &mut app.state.menu;
    match nav_input(key) {
        Some(NavInput::Up) => menu.move_cursor(false),
        Some(NavInput::Down) => menu.move_cursor(true),
        Some(dir @ (NavInput::Left | NavInput::Right)) => {
            let forward = dir == NavInput::Right;
            match menu.selected() {
                MenuItem::Difficulty => menu.cycle_difficulty(forward),
                MenuItem::Mode => menu.cycle_mode(forward),
                _ => {}
            }
        }
        Some(NavInput::Select) => match menu.selected() {
            MenuItem::Play => {
                quiz.handle(menu.start_command());
                app.summary = None;
                app.state.screen = Screen::Play;
            }
            MenuItem::Difficulty => menu.cycle_difficulty(true),
            MenuItem::Mode => menu.cycle_mode(true),
            MenuItem::Badges => {
                app.state.badge_scroll = 0;
                app.state.screen = Screen::Badges;
            }
            MenuItem::Learn => {
                app.state.learn.detail = None;
                app.state.screen = Screen::Learn;
            }
            MenuItem::Settings => app.state.screen = Screen::Settings,
            MenuItem::Quit => return Flow::Quit,
        },
        _ => {}
    }
    Flow::Continue
}

fn handle_play_key(app: &mut App, quiz: &mut GeoQuiz, key: KeyEvent) -> Flow {
    if should_quit(key) {
        quiz.handle(QuizCommand::Abandon);
        return Flow::Quit;
    }
    let Some(input) = play_input(key) else {
        return Flow::Continue;
    };

    match input {
        PlayInput::Abandon => {
            quiz.handle(QuizCommand::Abandon);
            app.state.screen = Screen::Menu;
        }
        PlayInput::Next if !quiz.session().active() => {
            app.state.screen = match app.summary.take() {
                Some(summary) => Screen::Summary(summary),
                None => Screen::Menu,
            };
        }
        _ => {
            let Some(question) = quiz.session().question().copied() else {
                return Flow::Continue;
            };
            if let Some(command) = to_command(input, &question.options) {
                if !quiz.handle(command) {
                    tracing::debug!(?command, "ignored");
                }
            }
        }
    }
    Flow::Continue
}

fn handle_learn_key(app: &mut App, quiz: &GeoQuiz, key: KeyEvent) {
    let learn = &mut app.state.learn;
    let Some(input) = nav_input(key) else {
        return;
    };

    if learn.detail.is_some() {
        if matches!(input, NavInput::Back | NavInput::Select) {
            learn.detail = None;
        }
        return;
    }

    let catalog = quiz.catalog();
    match input {
        NavInput::Up | NavInput::Down => {
            let len = learn.results(catalog).len();
            learn.move_cursor(input == NavInput::Down, len);
        }
        NavInput::Tab | NavInput::Right => learn.cycle_region(true),
        NavInput::Left => learn.cycle_region(false),
        NavInput::Text(ch) => learn.push_char(ch),
        NavInput::Erase => learn.pop_char(),
        NavInput::Select => learn.open(catalog),
        NavInput::Back => app.state.screen = Screen::Menu,
    }
}
