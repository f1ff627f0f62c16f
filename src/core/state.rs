//! Game state module - manages the complete round state
//!
//! This module ties together the player, the falling entities, and the
//! score/lives/level bookkeeping. `tick` advances the world by one frame;
//! `apply_action` handles input-driven transitions between ticks.

use rand::Rng;

use crate::core::collision::{overlaps, Rect};
use crate::core::spawn::spawn_entities;
use crate::types::*;

/// Obstacle variants. Only one today; the tag keeps the wire open for more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleKind {
    Enemy,
}

/// Power-up variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    /// Absorbs exactly one obstacle hit.
    Shield,
    /// Doubles the move step for a fixed duration.
    Boost,
}

/// A falling obstacle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::square(self.x, self.y, ENTITY_SIZE)
    }
}

/// A falling, collectible power-up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn rect(&self) -> Rect {
        Rect::square(self.x, self.y, ENTITY_SIZE)
    }
}

/// The player's ship.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    /// Single-use collision absorber (boolean, not a counter).
    pub shield: bool,
    /// Remaining boost duration in ticks (0 = not boosted).
    pub boost_ticks: u32,
}

impl Player {
    fn at_start() -> Self {
        Self {
            x: PLAYER_START_X,
            y: PLAYER_START_Y,
            shield: false,
            boost_ticks: 0,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.x, self.y, PLAYER_SIZE)
    }

    pub fn is_boosted(&self) -> bool {
        self.boost_ticks > 0
    }

    /// Current movement step per key event.
    pub fn move_step(&self) -> f32 {
        if self.is_boosted() {
            MOVE_STEP * BOOST_MULTIPLIER
        } else {
            MOVE_STEP
        }
    }
}

/// Complete round state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub player: Player,
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUp>,
    pub score: u32,
    pub lives: u8,
    pub level: u32,
    pub phase: GamePhase,
}

impl GameState {
    /// Create a state that has not been started yet.
    pub fn new() -> Self {
        Self {
            player: Player::at_start(),
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            score: 0,
            lives: STARTING_LIVES,
            level: 1,
            phase: GamePhase::NotStarted,
        }
    }

    /// (Re)initialize everything and enter `Playing`.
    ///
    /// Reachable from `NotStarted` (first start) and `GameOver` (restart).
    pub fn start(&mut self) {
        *self = Self::new();
        self.phase = GamePhase::Playing;
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Apply a game action. Returns whether the action had any effect.
    ///
    /// Movement is accepted only while `Playing`; `Start` only outside it.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Start => {
                if self.is_playing() {
                    return false;
                }
                self.start();
                true
            }
            GameAction::MoveLeft => self.move_player(-1.0, 0.0),
            GameAction::MoveRight => self.move_player(1.0, 0.0),
            GameAction::MoveUp => self.move_player(0.0, -1.0),
            GameAction::MoveDown => self.move_player(0.0, 1.0),
        }
    }

    /// Offset the player by one step along an axis, clamped to the playfield.
    fn move_player(&mut self, dx: f32, dy: f32) -> bool {
        if !self.is_playing() {
            return false;
        }
        let step = self.player.move_step();
        self.player.x = (self.player.x + dx * step).clamp(0.0, GAME_WIDTH - PLAYER_SIZE);
        self.player.y = (self.player.y + dy * step).clamp(0.0, GAME_HEIGHT - PLAYER_SIZE);
        true
    }

    /// Advance the world by one frame.
    ///
    /// The phase check at the top doubles as the cancellation guard: a tick
    /// that fires after game over (or before the first start) is a no-op, so
    /// stopping is idempotent.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        if !self.is_playing() {
            return;
        }

        // 1. Advance entities. Power-ups fall one unit slower than obstacles,
        // a deliberate difficulty asymmetry.
        let obstacle_fall = self.level as f32 + 3.0;
        let power_up_fall = self.level as f32 + 2.0;
        for obstacle in &mut self.obstacles {
            obstacle.y += obstacle_fall;
        }
        for power_up in &mut self.power_ups {
            power_up.y += power_up_fall;
        }

        // 2. Prune entities that left the playfield.
        self.obstacles.retain(|o| o.y < GAME_HEIGHT);
        self.power_ups.retain(|p| p.y < GAME_HEIGHT);

        // 3. Maybe introduce new entities at the top.
        spawn_entities(self, rng);

        // 4. Obstacle collisions: detect via OR across all obstacles, apply
        // at most one penalty per tick however many overlap simultaneously.
        // Colliding obstacles stay in the field.
        let player_rect = self.player.rect();
        let hit = self
            .obstacles
            .iter()
            .any(|o| overlaps(player_rect, o.rect()));
        if hit {
            if self.player.shield {
                self.player.shield = false;
            } else {
                self.lives = self.lives.saturating_sub(1);
                if self.lives == 0 {
                    self.phase = GamePhase::GameOver;
                }
            }
        }

        // 5. Power-up collection.
        let mut collected: Vec<PowerUpKind> = Vec::new();
        self.power_ups.retain(|p| {
            if overlaps(player_rect, p.rect()) {
                collected.push(p.kind);
                false
            } else {
                true
            }
        });
        for kind in collected {
            match kind {
                PowerUpKind::Shield => self.player.shield = true,
                PowerUpKind::Boost => self.player.boost_ticks = BOOST_DURATION_TICKS,
            }
        }

        // 6. Timed effects wind down.
        self.player.boost_ticks = self.player.boost_ticks.saturating_sub(1);

        // 7. Score ticks up even on the frame that ends the round.
        self.score += 1;

        // 8. Level-up on every full score interval. Gated on score > 0 so a
        // fresh round does not level up immediately.
        if self.score > 0 && self.score % LEVEL_SCORE_INTERVAL == 0 {
            self.level += 1;
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    /// An RNG whose uniform draws are maximal, so probabilistic spawns never
    /// fire. Keeps multi-tick tests hermetic: nothing enters the field unless
    /// the test put it there.
    struct NoSpawnRng;

    impl RngCore for NoSpawnRng {
        fn next_u32(&mut self) -> u32 {
            u32::MAX
        }
        fn next_u64(&mut self) -> u64 {
            u64::MAX
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0xff);
        }
        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            dest.fill(0xff);
            Ok(())
        }
    }

    fn playing_state() -> GameState {
        let mut state = GameState::new();
        state.start();
        state
    }

    fn obstacle_at(x: f32, y: f32) -> Obstacle {
        Obstacle {
            x,
            y,
            kind: ObstacleKind::Enemy,
        }
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new();

        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.level, 1);
        assert!(!state.player.shield);
        assert!(!state.player.is_boosted());
        assert!(state.obstacles.is_empty());
        assert!(state.power_ups.is_empty());
        assert_eq!(state.player.x, PLAYER_START_X);
        assert_eq!(state.player.y, PLAYER_START_Y);
    }

    #[test]
    fn test_start_enters_playing() {
        let mut state = GameState::new();
        assert!(state.apply_action(GameAction::Start));
        assert!(state.is_playing());
    }

    #[test]
    fn test_start_is_rejected_while_playing() {
        let mut state = playing_state();
        state.score = 50;
        assert!(!state.apply_action(GameAction::Start));
        assert_eq!(state.score, 50);
    }

    #[test]
    fn test_movement_ignored_before_start() {
        let mut state = GameState::new();
        assert!(!state.apply_action(GameAction::MoveLeft));
        assert_eq!(state.player.x, PLAYER_START_X);
    }

    #[test]
    fn test_movement_ignored_after_game_over() {
        let mut state = playing_state();
        state.phase = GamePhase::GameOver;
        assert!(!state.apply_action(GameAction::MoveRight));
        assert_eq!(state.player.x, PLAYER_START_X);
    }

    #[test]
    fn test_movement_steps_and_clamping() {
        let mut state = playing_state();

        state.apply_action(GameAction::MoveRight);
        assert_eq!(state.player.x, PLAYER_START_X + MOVE_STEP);
        state.apply_action(GameAction::MoveLeft);
        assert_eq!(state.player.x, PLAYER_START_X);

        // Drive into the left wall.
        for _ in 0..200 {
            state.apply_action(GameAction::MoveLeft);
        }
        assert_eq!(state.player.x, 0.0);

        // And the right wall.
        for _ in 0..200 {
            state.apply_action(GameAction::MoveRight);
        }
        assert_eq!(state.player.x, GAME_WIDTH - PLAYER_SIZE);

        // Top and bottom.
        for _ in 0..200 {
            state.apply_action(GameAction::MoveUp);
        }
        assert_eq!(state.player.y, 0.0);
        for _ in 0..200 {
            state.apply_action(GameAction::MoveDown);
        }
        assert_eq!(state.player.y, GAME_HEIGHT - PLAYER_SIZE);
    }

    #[test]
    fn test_tick_is_noop_outside_playing() {
        let mut state = GameState::new();
        state.tick(&mut rng());
        assert_eq!(state.score, 0);

        state.phase = GamePhase::GameOver;
        state.score = 7;
        state.tick(&mut rng());
        assert_eq!(state.score, 7);
    }

    #[test]
    fn test_tick_increments_score() {
        let mut state = playing_state();
        state.tick(&mut rng());
        assert_eq!(state.score, 1);
        assert_eq!(state.lives, 3);
        assert!(state.is_playing());
    }

    #[test]
    fn test_fall_speed_asymmetry() {
        let mut state = playing_state();
        state.obstacles.push(obstacle_at(200.0, 100.0));
        state.power_ups.push(PowerUp {
            x: 300.0,
            y: 100.0,
            kind: PowerUpKind::Shield,
        });

        state.tick(&mut rng());

        // Level 1: obstacles fall 4, power-ups 3.
        assert_eq!(state.obstacles[0].y, 104.0);
        assert_eq!(state.power_ups[0].y, 103.0);
    }

    #[test]
    fn test_offscreen_entities_are_pruned() {
        let mut state = playing_state();
        state.obstacles.push(obstacle_at(200.0, GAME_HEIGHT - 1.0));
        state.power_ups.push(PowerUp {
            x: 300.0,
            y: GAME_HEIGHT - 1.0,
            kind: PowerUpKind::Boost,
        });

        state.tick(&mut rng());

        assert!(state.obstacles.iter().all(|o| o.y < GAME_HEIGHT));
        assert!(state.power_ups.iter().all(|p| p.y < GAME_HEIGHT));
    }

    #[test]
    fn test_unshielded_collision_costs_a_life() {
        let mut state = playing_state();
        // Sits on the player after this tick's advancement.
        state
            .obstacles
            .push(obstacle_at(state.player.x, state.player.y - 4.0));

        state.tick(&mut rng());

        assert_eq!(state.lives, 2);
        assert!(state.is_playing());
    }

    #[test]
    fn test_simultaneous_overlaps_cost_at_most_one_life() {
        let mut state = playing_state();
        state
            .obstacles
            .push(obstacle_at(state.player.x, state.player.y - 4.0));
        state
            .obstacles
            .push(obstacle_at(state.player.x + 5.0, state.player.y - 4.0));
        state
            .obstacles
            .push(obstacle_at(state.player.x + 10.0, state.player.y - 4.0));

        state.tick(&mut rng());

        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_collision_on_last_life_ends_the_round() {
        let mut state = playing_state();
        state.lives = 1;
        state
            .obstacles
            .push(obstacle_at(state.player.x, state.player.y - 4.0));

        state.tick(&mut rng());

        assert_eq!(state.lives, 0);
        assert!(state.game_over());

        // Subsequent ticks are inert.
        let score = state.score;
        state.tick(&mut rng());
        assert_eq!(state.score, score);
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_shield_absorbs_exactly_one_hit() {
        let mut state = playing_state();
        state.player.shield = true;
        state
            .obstacles
            .push(obstacle_at(state.player.x, state.player.y - 4.0));

        state.tick(&mut rng());

        assert_eq!(state.lives, 3);
        assert!(!state.player.shield);

        // The obstacle is still there; next overlap costs a life.
        state.obstacles[0].y = state.player.y - 4.0;
        state.tick(&mut rng());
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_shield_power_up_collection() {
        let mut state = playing_state();
        state.power_ups.push(PowerUp {
            x: state.player.x,
            y: state.player.y - 3.0,
            kind: PowerUpKind::Shield,
        });

        state.tick(&mut rng());

        assert!(state.player.shield);
        assert!(
            state
                .power_ups
                .iter()
                .all(|p| p.kind != PowerUpKind::Shield || p.y < 0.0),
            "collected shield should be gone from the active set"
        );
        assert_eq!(state.lives, 3);
    }

    #[test]
    fn test_second_shield_is_collected_but_does_not_stack() {
        let mut state = playing_state();
        state.player.shield = true;
        state.power_ups.push(PowerUp {
            x: state.player.x,
            y: state.player.y - 3.0,
            kind: PowerUpKind::Shield,
        });

        state.tick(&mut NoSpawnRng);

        // The power-up is consumed; the shield stays a boolean, not a counter.
        assert!(state.power_ups.is_empty());
        assert!(state.player.shield);

        // One hit is absorbed, exactly once.
        state
            .obstacles
            .push(obstacle_at(state.player.x, state.player.y - 4.0));
        state.tick(&mut NoSpawnRng);
        assert_eq!(state.lives, STARTING_LIVES);
        assert!(!state.player.shield);

        state.obstacles[0].y = state.player.y - 4.0;
        state.tick(&mut NoSpawnRng);
        assert_eq!(state.lives, STARTING_LIVES - 1);
    }

    #[test]
    fn test_boost_power_up_doubles_move_step_for_a_while() {
        let mut state = playing_state();
        state.power_ups.push(PowerUp {
            x: state.player.x,
            y: state.player.y - 3.0,
            kind: PowerUpKind::Boost,
        });

        state.tick(&mut NoSpawnRng);

        assert!(state.player.is_boosted());
        assert_eq!(state.player.move_step(), MOVE_STEP * BOOST_MULTIPLIER);

        let x = state.player.x;
        state.apply_action(GameAction::MoveRight);
        assert_eq!(state.player.x, x + MOVE_STEP * BOOST_MULTIPLIER);

        // Run the boost out.
        for _ in 0..BOOST_DURATION_TICKS {
            state.tick(&mut NoSpawnRng);
        }
        assert!(!state.player.is_boosted());
        assert_eq!(state.player.move_step(), MOVE_STEP);
    }

    #[test]
    fn test_level_up_at_score_interval_not_at_zero() {
        let mut state = playing_state();
        assert_eq!(state.level, 1);

        // No level-up during the first 99 ticks.
        for _ in 0..(LEVEL_SCORE_INTERVAL - 1) {
            state.tick(&mut NoSpawnRng);
        }
        assert_eq!(state.score, LEVEL_SCORE_INTERVAL - 1);
        assert_eq!(state.level, 1);

        state.tick(&mut NoSpawnRng);
        assert_eq!(state.score, LEVEL_SCORE_INTERVAL);
        assert_eq!(state.level, 2);
    }

    #[test]
    fn test_restart_after_game_over_resets_everything() {
        let mut state = playing_state();
        state.score = 250;
        state.level = 3;
        state.lives = 0;
        state.phase = GamePhase::GameOver;
        state.player.shield = true;
        state.player.boost_ticks = 10;
        state.obstacles.push(obstacle_at(10.0, 10.0));
        state.power_ups.push(PowerUp {
            x: 20.0,
            y: 20.0,
            kind: PowerUpKind::Boost,
        });

        assert!(state.apply_action(GameAction::Start));

        assert!(state.is_playing());
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.level, 1);
        assert!(!state.player.shield);
        assert!(!state.player.is_boosted());
        assert!(state.obstacles.is_empty());
        assert!(state.power_ups.is_empty());
        assert_eq!(state.player.x, PLAYER_START_X);
        assert_eq!(state.player.y, PLAYER_START_Y);
    }

    #[test]
    fn test_lives_stay_in_bounds_over_a_long_run() {
        let mut state = playing_state();
        let mut rng = rng();
        for _ in 0..5_000 {
            state.tick(&mut rng);
            assert!(state.lives <= STARTING_LIVES);
            if state.game_over() {
                break;
            }
        }
    }
}
