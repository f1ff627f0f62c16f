//! Held-arrow input handler for terminal environments.
//!
//! Terminals frequently do not emit key release events, so a held arrow is
//! tracked from its press events and auto-released after a timeout. While
//! held, the movement action is re-emitted at a fixed repeat interval so the
//! ship glides instead of stuttering on the OS key-repeat rate.

use crossterm::event::KeyCode;

use arrayvec::ArrayVec;

use crate::types::{GameAction, KEY_RELEASE_TIMEOUT_MS, MOVE_REPEAT_MS};

/// Held direction on the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Horizontal {
    Left,
    Right,
}

/// Held direction on the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vertical {
    Up,
    Down,
}

/// Tracks held arrows and emits movement repeats each tick.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: Option<Horizontal>,
    vertical: Option<Vertical>,
    last_key_time: std::time::Instant,
    horizontal_accumulator: u32,
    vertical_accumulator: u32,
    repeat_ms: u32,
    key_release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::with_repeat_ms(MOVE_REPEAT_MS)
    }

    pub fn with_repeat_ms(repeat_ms: u32) -> Self {
        Self {
            horizontal: None,
            vertical: None,
            last_key_time: std::time::Instant::now(),
            horizontal_accumulator: 0,
            vertical_accumulator: 0,
            repeat_ms,
            key_release_timeout_ms: KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    /// Register a key press. Returns the action to apply immediately on the
    /// first press of a direction; repeats of an already-held direction only
    /// refresh the auto-release window.
    pub fn handle_key_press(&mut self, code: KeyCode) -> Option<GameAction> {
        match code {
            KeyCode::Left => {
                self.last_key_time = std::time::Instant::now();
                if self.horizontal == Some(Horizontal::Left) {
                    None
                } else {
                    self.horizontal = Some(Horizontal::Left);
                    self.horizontal_accumulator = 0;
                    Some(GameAction::MoveLeft)
                }
            }
            KeyCode::Right => {
                self.last_key_time = std::time::Instant::now();
                if self.horizontal == Some(Horizontal::Right) {
                    None
                } else {
                    self.horizontal = Some(Horizontal::Right);
                    self.horizontal_accumulator = 0;
                    Some(GameAction::MoveRight)
                }
            }
            KeyCode::Up => {
                self.last_key_time = std::time::Instant::now();
                if self.vertical == Some(Vertical::Up) {
                    None
                } else {
                    self.vertical = Some(Vertical::Up);
                    self.vertical_accumulator = 0;
                    Some(GameAction::MoveUp)
                }
            }
            KeyCode::Down => {
                self.last_key_time = std::time::Instant::now();
                if self.vertical == Some(Vertical::Down) {
                    None
                } else {
                    self.vertical = Some(Vertical::Down);
                    self.vertical_accumulator = 0;
                    Some(GameAction::MoveDown)
                }
            }
            _ => None,
        }
    }

    /// Register a key release (for terminals that do emit them).
    pub fn handle_key_release(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left if self.horizontal == Some(Horizontal::Left) => {
                self.horizontal = None;
                self.horizontal_accumulator = 0;
            }
            KeyCode::Right if self.horizontal == Some(Horizontal::Right) => {
                self.horizontal = None;
                self.horizontal_accumulator = 0;
            }
            KeyCode::Up if self.vertical == Some(Vertical::Up) => {
                self.vertical = None;
                self.vertical_accumulator = 0;
            }
            KeyCode::Down if self.vertical == Some(Vertical::Down) => {
                self.vertical = None;
                self.vertical_accumulator = 0;
            }
            _ => {}
        }
    }

    /// Advance held-key timers by `elapsed_ms` and collect repeat actions.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, 32> {
        let mut actions = ArrayVec::<GameAction, 32>::new();

        // Auto-release when the terminal never sent a release event.
        let since_last_key = self.last_key_time.elapsed().as_millis() as u32;
        if since_last_key > self.key_release_timeout_ms {
            self.horizontal = None;
            self.vertical = None;
            self.horizontal_accumulator = 0;
            self.vertical_accumulator = 0;
            return actions;
        }

        if let Some(dir) = self.horizontal {
            self.horizontal_accumulator += elapsed_ms;
            while self.horizontal_accumulator >= self.repeat_ms {
                self.horizontal_accumulator -= self.repeat_ms;
                let action = match dir {
                    Horizontal::Left => GameAction::MoveLeft,
                    Horizontal::Right => GameAction::MoveRight,
                };
                let _ = actions.try_push(action);
            }
        } else {
            self.horizontal_accumulator = 0;
        }

        if let Some(dir) = self.vertical {
            self.vertical_accumulator += elapsed_ms;
            while self.vertical_accumulator >= self.repeat_ms {
                self.vertical_accumulator -= self.repeat_ms;
                let action = match dir {
                    Vertical::Up => GameAction::MoveUp,
                    Vertical::Down => GameAction::MoveDown,
                };
                let _ = actions.try_push(action);
            }
        } else {
            self.vertical_accumulator = 0;
        }

        actions
    }

    pub fn reset(&mut self) {
        self.horizontal = None;
        self.vertical = None;
        self.horizontal_accumulator = 0;
        self.vertical_accumulator = 0;
        self.last_key_time = std::time::Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
