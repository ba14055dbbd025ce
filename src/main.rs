//! Terminal runner (default binary).
//!
//! Fixed 16 ms loop: render, poll input until the next tick, apply actions,
//! then advance gravity by the elapsed tick.

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use log::{info, warn};

use cube_tetris::config::RunnerConfig;
use cube_tetris::core::{GameSnapshot, GameState};
use cube_tetris::input::{map_key, should_quit};
use cube_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use cube_tetris::types::TICK_MS;

fn main() -> Result<()> {
    let config = RunnerConfig::load().context("loading configuration")?;
    init_logging(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

/// The terminal is in raw mode while playing, so log records go to a file,
/// and only when `RUST_LOG` asks for them.
fn init_logging(config: &RunnerConfig) -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        return Ok(());
    }

    let file = File::create(&config.log_file)
        .with_context(|| format!("creating log file {}", config.log_file.display()))?;
    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, config: &RunnerConfig) -> Result<()> {
    let game_config = config.game_config();
    info!(
        "starting with seed {} and gravity {} ms",
        game_config.seed, game_config.gravity_ms
    );
    let mut game = GameState::with_config(game_config);

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!("quit requested (score {})", game.score());
                        return Ok(());
                    }
                    if let Some(action) = map_key(key, game.phase()) {
                        game.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        // Tick.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
            if elapsed_ms > TICK_MS * 4 {
                warn!("slow frame: {elapsed_ms} ms");
            }
            game.tick(elapsed_ms);
        }
    }
}
