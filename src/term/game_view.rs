//! GameView: projects `core::GameState` into a terminal framebuffer.
//!
//! This module is pure (no I/O), so the whole presentation layer can be
//! unit-tested by inspecting framebuffer cells.

use crate::core::{GameState, PowerUpKind};
use crate::term::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{
    GamePhase, BOOST_DURATION_TICKS, ENTITY_SIZE, GAME_HEIGHT, GAME_WIDTH, PLAYER_SIZE, TICK_MS,
};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Projects the continuous playfield onto a character grid.
pub struct GameView {
    /// Playfield width in terminal columns.
    field_cols: u16,
    /// Playfield height in terminal rows.
    field_rows: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 40x30 keeps world cells roughly square on typical terminal glyphs
        // (10 world units per column, 20 per row).
        Self {
            field_cols: 40,
            field_rows: 30,
        }
    }
}

impl GameView {
    /// Render the current game state into a fresh framebuffer.
    pub fn render(&self, state: &GameState, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        fb.clear();

        let frame_w = self.field_cols + 2;
        let frame_h = self.field_rows + 2;
        let start_x = viewport.width.saturating_sub(frame_w + SIDE_PANEL_W) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        self.draw_border(&mut fb, start_x, start_y, frame_w, frame_h);

        let origin = (start_x + 1, start_y + 1);

        for power_up in &state.power_ups {
            let (ch, style) = match power_up.kind {
                PowerUpKind::Shield => ('◆', CellStyle::bold(Rgb::new(80, 220, 220))),
                PowerUpKind::Boost => ('»', CellStyle::bold(Rgb::new(240, 220, 80))),
            };
            self.draw_sprite(&mut fb, origin, power_up.x, power_up.y, ENTITY_SIZE, ch, style);
        }

        let obstacle_style = CellStyle::plain(Rgb::new(220, 80, 80));
        for obstacle in &state.obstacles {
            self.draw_sprite(
                &mut fb,
                origin,
                obstacle.x,
                obstacle.y,
                ENTITY_SIZE,
                '▼',
                obstacle_style,
            );
        }

        let ship_color = if state.player.shield {
            Rgb::new(80, 220, 220)
        } else {
            Rgb::new(100, 220, 120)
        };
        self.draw_sprite(
            &mut fb,
            origin,
            state.player.x,
            state.player.y,
            PLAYER_SIZE,
            '█',
            CellStyle::bold(ship_color),
        );

        self.draw_side_panel(&mut fb, state, viewport, start_x, start_y, frame_w);

        match state.phase {
            GamePhase::NotStarted => {
                self.draw_overlay(
                    &mut fb,
                    start_x,
                    start_y,
                    frame_w,
                    frame_h,
                    &["COSMIC DODGE", "", "Press Enter to start"],
                );
            }
            GamePhase::GameOver => {
                let score_line = format!("Your Score: {}", state.score);
                self.draw_overlay(
                    &mut fb,
                    start_x,
                    start_y,
                    frame_w,
                    frame_h,
                    &["GAME OVER", "", &score_line, "Press Enter to play again"],
                );
            }
            GamePhase::Playing => {}
        }

        fb
    }

    /// Map a square sprite from world units to a clipped cell rectangle.
    fn draw_sprite(
        &self,
        fb: &mut FrameBuffer,
        origin: (u16, u16),
        x: f32,
        y: f32,
        size: f32,
        ch: char,
        style: CellStyle,
    ) {
        let sx = self.field_cols as f32 / GAME_WIDTH;
        let sy = self.field_rows as f32 / GAME_HEIGHT;

        let x0 = (x * sx).floor() as i32;
        let y0 = (y * sy).floor() as i32;
        let w = ((size * sx).round() as i32).max(1);
        let h = ((size * sy).round() as i32).max(1);

        for cy in y0..y0 + h {
            for cx in x0..x0 + w {
                if cx < 0 || cy < 0 || cx >= self.field_cols as i32 || cy >= self.field_rows as i32
                {
                    continue;
                }
                fb.put_char(origin.0 + cx as u16, origin.1 + cy as u16, ch, style);
            }
        }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        let style = CellStyle::plain(Rgb::new(200, 200, 200));
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        state: &GameState,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x + 10 >= viewport.width {
            return;
        }

        let label = CellStyle::bold(Rgb::new(220, 220, 220));
        let value = CellStyle::plain(Rgb::new(200, 200, 200));
        let hint = CellStyle {
            dim: true,
            ..value
        };

        let mut y = start_y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &state.score.to_string(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LEVEL", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &state.level.to_string(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LIVES", label);
        y = y.saturating_add(1);
        let hearts = "♥ ".repeat(state.lives as usize);
        fb.put_str(panel_x, y, hearts.trim_end(), CellStyle::plain(Rgb::new(220, 80, 80)));
        y = y.saturating_add(2);

        if state.player.shield {
            fb.put_str(panel_x, y, "SHIELD", CellStyle::bold(Rgb::new(80, 220, 220)));
            y = y.saturating_add(1);
        }
        if state.player.is_boosted() {
            let secs = state.player.boost_ticks * TICK_MS / 1000;
            fb.put_str(
                panel_x,
                y,
                &format!("BOOST {}s", secs.min(BOOST_DURATION_TICKS * TICK_MS / 1000)),
                CellStyle::bold(Rgb::new(240, 220, 80)),
            );
            y = y.saturating_add(1);
        }
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "arrows  move", hint);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "enter   start", hint);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, "q       quit", hint);
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
        lines: &[&str],
    ) {
        let style = CellStyle::bold(Rgb::new(255, 255, 255));
        let first_y = start_y
            .saturating_add(frame_h / 2)
            .saturating_sub(lines.len() as u16 / 2);
        for (i, line) in lines.iter().enumerate() {
            let text_w = line.chars().count() as u16;
            let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
            fb.put_str(x, first_y.saturating_add(i as u16), line, style);
        }
    }
}

/// Columns reserved for the score panel to the right of the playfield.
const SIDE_PANEL_W: u16 = 18;
