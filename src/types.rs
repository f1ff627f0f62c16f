//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Playfield dimensions in world units
pub const GAME_WIDTH: f32 = 400.0;
pub const GAME_HEIGHT: f32 = 600.0;

/// Sprite sizes (world units, everything is a square)
pub const PLAYER_SIZE: f32 = 40.0;
pub const ENTITY_SIZE: f32 = 30.0;

/// Player movement step per key event (world units)
pub const MOVE_STEP: f32 = 5.0;
/// Move-step multiplier while a boost is active
pub const BOOST_MULTIPLIER: f32 = 2.0;

/// Player spawn position (top-left corner, y grows downward)
pub const PLAYER_START_X: f32 = 50.0;
pub const PLAYER_START_Y: f32 = 80.0;

pub const STARTING_LIVES: u8 = 3;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
/// Boost power-up duration
pub const BOOST_DURATION_MS: u32 = 3000;
pub const BOOST_DURATION_TICKS: u32 = BOOST_DURATION_MS / TICK_MS;

/// Held-key repeat timing (milliseconds)
pub const MOVE_REPEAT_MS: u32 = 16;
pub const KEY_RELEASE_TIMEOUT_MS: u32 = 150;

/// Per-tick spawn probabilities ([0,1) uniform draws)
pub const OBSTACLE_SPAWN_BASE: f64 = 0.02;
pub const POWERUP_SPAWN_CHANCE: f64 = 0.01;

/// A level is gained every this many score ticks
pub const LEVEL_SCORE_INTERVAL: u32 = 100;

/// Round lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    NotStarted,
    Playing,
    GameOver,
}

/// Game actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Start a fresh round (also restarts after game over)
    Start,
}
