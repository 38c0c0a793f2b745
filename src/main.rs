//! Terminal 2048 runner (default binary).
//!
//! Reads configuration from the environment, restores the best score and
//! settings, then runs a blocking event loop: every key press or mouse swipe
//! becomes one [`GameAction`](tui_2048::types::GameAction), and the board is
//! redrawn after each event.

use std::fs::OpenOptions;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind, MouseButton, MouseEventKind};
use log::info;

use tui_2048::core::{ChaChaSource, GameSession, SessionSnapshot};
use tui_2048::input::{map_key, should_quit, SwipeDetector, SWIPE_MAX_DURATION};
use tui_2048::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_2048::types::GameAction;
use tui_2048::{App, AppConfig};

/// Mouse swipes are measured in terminal columns; rows count double since
/// glyphs are about twice as tall as they are wide.
const MOUSE_SWIPE_MIN_CELLS: f32 = 4.0;
const ROW_ASPECT: f32 = 2.0;

fn main() -> Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    init_logging(&config)?;

    let persistence = config.persistence();
    let settings = persistence.load_settings();
    let rng = match config.seed {
        Some(seed) => ChaChaSource::seeded(seed),
        None => ChaChaSource::from_entropy(),
    };
    let session = GameSession::with_persistence(config.game_config(&settings), rng, persistence);
    info!(
        "starting on {} (best {}, seed {:?})",
        session.board_size(),
        session.best_score(),
        config.seed
    );
    let mut app = App::new(session, settings);

    let mut term = TerminalRenderer::new();
    let result = term.enter(true).and_then(|()| run(&mut term, &mut app));

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(config: &AppConfig) -> Result<()> {
    // stdout belongs to the game; log only when a file is configured.
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    env_logger::Builder::new()
        .parse_filters(&config.log_filter)
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to install logger")?;
    Ok(())
}

fn run(term: &mut TerminalRenderer, app: &mut App<ChaChaSource>) -> Result<()> {
    let view = GameView::new();
    let mut swipe = SwipeDetector::new(MOUSE_SWIPE_MIN_CELLS, SWIPE_MAX_DURATION);
    let mut snap = SessionSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        app.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), app.view_options(), &mut fb);
        term.draw_swap(&mut fb)?;

        // Block until the next input.
        let action = match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if should_quit(key) {
                    return Ok(());
                }
                map_key(key)
            }
            Event::Mouse(mouse) => {
                let (x, y) = (mouse.column as f32, mouse.row as f32 * ROW_ASPECT);
                match mouse.kind {
                    MouseEventKind::Down(MouseButton::Left) => {
                        swipe.begin(x, y, Instant::now());
                        None
                    }
                    MouseEventKind::Up(MouseButton::Left) => {
                        swipe.end(x, y, Instant::now()).map(GameAction::Move)
                    }
                    _ => None,
                }
            }
            Event::Resize(_, _) => {
                // A press from before the resize is in stale coordinates.
                swipe.cancel();
                term.invalidate();
                None
            }
            _ => None,
        };

        if let Some(action) = action {
            let events = app.dispatch(action);
            if app.wants_bell(&events) {
                term.bell()?;
            }
        }
    }
}
