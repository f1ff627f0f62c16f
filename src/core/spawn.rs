//! Probabilistic entity spawner.
//!
//! Runs once per tick. Obstacle pressure scales linearly with the level;
//! power-ups trickle in at a fixed, level-independent rate.

use rand::Rng;

use crate::core::state::{GameState, Obstacle, ObstacleKind, PowerUp, PowerUpKind};
use crate::types::{ENTITY_SIZE, GAME_WIDTH, OBSTACLE_SPAWN_BASE, POWERUP_SPAWN_CHANCE};

/// Maybe append new entities at the top of the playfield.
///
/// New entities start at y = -ENTITY_SIZE so they slide into view instead of
/// popping in.
pub fn spawn_entities(state: &mut GameState, rng: &mut impl Rng) {
    let obstacle_chance = OBSTACLE_SPAWN_BASE * state.level as f64;
    if rng.gen::<f64>() < obstacle_chance {
        state.obstacles.push(Obstacle {
            x: rng.gen_range(0.0..GAME_WIDTH - ENTITY_SIZE),
            y: -ENTITY_SIZE,
            kind: ObstacleKind::Enemy,
        });
    }

    if rng.gen::<f64>() < POWERUP_SPAWN_CHANCE {
        let kind = if rng.gen_bool(0.5) {
            PowerUpKind::Shield
        } else {
            PowerUpKind::Boost
        };
        state.power_ups.push(PowerUp {
            x: rng.gen_range(0.0..GAME_WIDTH - ENTITY_SIZE),
            y: -ENTITY_SIZE,
            kind,
        });
    }
}
