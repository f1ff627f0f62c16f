//! Core module - pure game logic with no external dependencies
//!
//! This module contains the simulation rules and state management.
//! It has zero dependencies on UI or I/O; randomness is injected.

pub mod collision;
pub mod spawn;
pub mod state;

// Re-export commonly used types
pub use collision::{overlaps, Rect};
pub use state::{GameState, Obstacle, ObstacleKind, Player, PowerUp, PowerUpKind};
