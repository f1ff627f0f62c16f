//! Cosmic Dodge runner.
//!
//! Fixed-tick loop: render, poll input until the next tick boundary, then
//! advance the simulation. Input uses crossterm key events with a held-key
//! handler so arrows glide on terminals without release events.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use cosmic_dodge::core::GameState;
use cosmic_dodge::input::{map_key, should_quit, InputHandler};
use cosmic_dodge::term::{GameView, TerminalRenderer, Viewport};
use cosmic_dodge::types::{GameAction, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let mut game_state = GameState::new();
    let mut rng = rand::thread_rng();

    let view = GameView::default();
    let mut input_handler = InputHandler::new();

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Render.
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let fb = view.render(&game_state, Viewport::new(w, h));
        term.draw(fb)?;

        // Input with timeout until the next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => match key.kind {
                    KeyEventKind::Press => {
                        if should_quit(key) {
                            return Ok(());
                        }

                        match map_key(key.code) {
                            Some(GameAction::Start) => {
                                if game_state.apply_action(GameAction::Start) {
                                    input_handler.reset();
                                }
                            }
                            Some(_) => {
                                if let Some(action) = input_handler.handle_key_press(key.code) {
                                    game_state.apply_action(action);
                                }
                            }
                            None => {}
                        }
                    }
                    KeyEventKind::Repeat => {
                        // Terminal auto-repeat is ignored; the handler emits
                        // its own repeats at a fixed cadence.
                    }
                    KeyEventKind::Release => {
                        input_handler.handle_key_release(key.code);
                    }
                },
                Event::Resize(_, _) => {
                    term.invalidate();
                }
                _ => {}
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            for action in input_handler.update(TICK_MS) {
                game_state.apply_action(action);
            }

            game_state.tick(&mut rng);
        }
    }
}
