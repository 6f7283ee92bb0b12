//! Canvas2D rendering
//!
//! Draws the track, players, countdown digits, race timer and scoreboard.
//! Strictly read-only over `RaceState`; the simulation never depends on
//! anything drawn here.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::consts::PLAYER_THICKNESS;
use crate::sim::{Player, RaceState};

use std::f64::consts::FRAC_PI_2;

const ASPHALT_COLOR: &str = "#333";
const GRASS_COLOR: &str = "#070";
const LINE_COLOR: &str = "#999";
const TEXT_COLOR: &str = "#fff";

/// Canvas2D renderer over a fixed-size canvas
pub struct Renderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl Renderer {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self { ctx, width, height }
    }

    /// Draw one complete frame
    pub fn draw(&self, state: &RaceState, now_ms: f64) -> Result<(), JsValue> {
        self.draw_background();
        self.draw_track(state)?;
        self.draw_start_line(state);
        for player in &state.players {
            self.draw_player(player);
        }
        self.draw_counter(state);
        self.draw_timer(state, now_ms);
        self.draw_scoreboard(state, now_ms);
        Ok(())
    }

    fn draw_background(&self) {
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(GRASS_COLOR);
        self.ctx.rect(0.0, 0.0, self.width, self.height);
        self.ctx.fill();
    }

    /// Stadium asphalt band: two half-ellipses joined by a rectangle, with
    /// the scaled-down infield painted back on top.
    fn draw_track(&self, state: &RaceState) -> Result<(), JsValue> {
        let track = &state.track;
        let (rx, ry) = track.outer_radii();
        let (irx, iry) = track.infield_radii();
        let cy = (track.height / 2.0) as f64;
        let left = track.straight_left() as f64;
        let right = track.straight_right() as f64;

        self.ctx.begin_path();
        self.ctx.set_fill_style_str(ASPHALT_COLOR);
        self.ctx
            .ellipse(left, cy, rx as f64, ry as f64, 0.0, FRAC_PI_2, -FRAC_PI_2)?;
        self.ctx
            .rect(left, 0.0, right - left, track.height as f64);
        self.ctx
            .ellipse(right, cy, rx as f64, ry as f64, 0.0, -FRAC_PI_2, FRAC_PI_2)?;
        self.ctx.fill();

        self.ctx.begin_path();
        self.ctx.set_fill_style_str(GRASS_COLOR);
        self.ctx
            .ellipse(left, cy, irx as f64, iry as f64, 0.0, FRAC_PI_2, -FRAC_PI_2)?;
        self.ctx
            .rect(left, cy - iry as f64, right - left, 2.0 * iry as f64);
        self.ctx
            .ellipse(right, cy, irx as f64, iry as f64, 0.0, -FRAC_PI_2, FRAC_PI_2)?;
        self.ctx.fill();

        Ok(())
    }

    fn draw_start_line(&self, state: &RaceState) {
        let (from, to) = state.track.start_line();
        self.ctx.begin_path();
        self.ctx.set_stroke_style_str(LINE_COLOR);
        self.ctx.set_line_width(4.0);
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn draw_player(&self, player: &Player) {
        let half = (PLAYER_THICKNESS / 2.0) as f64;
        let size = PLAYER_THICKNESS as f64;

        self.ctx.begin_path();
        self.ctx.set_fill_style_str(&player.color);
        self.ctx
            .fill_rect(player.head.x as f64 - half, player.head.y as f64 - half, size, size);
        for point in &player.tail {
            self.ctx
                .fill_rect(point.x as f64 - half, point.y as f64 - half, size, size);
        }
        self.ctx.fill();
    }

    /// Countdown digits: outlined until their threshold passes, then filled
    fn draw_counter(&self, state: &RaceState) {
        let countdown = &state.countdown;
        let font_size = (self.height / 20.0).round();
        let cx = self.width / 2.0;
        let cy = self.height / 2.0;

        self.ctx.begin_path();
        self.ctx.set_fill_style_str(TEXT_COLOR);
        self.ctx.set_stroke_style_str(TEXT_COLOR);
        self.ctx.set_line_width(1.0);
        self.ctx.set_font(&format!("{font_size}px sans-serif"));

        let digits = [
            ("3", countdown.one_passed, cx - font_size * 2.0),
            ("2", countdown.two_passed, cx),
            ("1", countdown.go_passed, cx + font_size * 2.0),
        ];
        for (digit, passed, x) in digits {
            if passed {
                let _ = self.ctx.fill_text(digit, x, cy);
            } else {
                let _ = self.ctx.stroke_text(digit, x, cy);
            }
        }
    }

    fn draw_timer(&self, state: &RaceState, now_ms: f64) {
        let Some(elapsed) = state.race_elapsed_ms(now_ms) else {
            return;
        };
        self.ctx.set_fill_style_str(TEXT_COLOR);
        self.ctx
            .set_font(&format!("{}px monospace", (self.height / 30.0).round()));
        let _ = self
            .ctx
            .fill_text(&format!("{:.1}s", elapsed / 1000.0), self.width - 80.0, 30.0);
    }

    /// One status line per player, in player color
    fn draw_scoreboard(&self, state: &RaceState, now_ms: f64) {
        let line_height = (self.height / 30.0).round();
        self.ctx
            .set_font(&format!("{}px monospace", line_height - 4.0));

        for (i, player) in state.players.iter().enumerate() {
            let status = player_status(state, player, now_ms);
            self.ctx.set_fill_style_str(&player.color);
            let _ = self.ctx.fill_text(
                &format!("P{} {}", i + 1, status),
                10.0,
                20.0 + i as f64 * line_height,
            );
        }
    }
}

/// Scoreboard text for one player
fn player_status(state: &RaceState, player: &Player, now_ms: f64) -> String {
    if player.has_finished {
        let time = player
            .finished_at
            .zip(state.started_at)
            .map(|(f, s)| (f - s) / 1000.0);
        match time {
            Some(secs) => format!("finished {secs:.1}s"),
            None => "finished".to_string(),
        }
    } else if player.has_collided {
        "crashed".to_string()
    } else if state.race_elapsed_ms(now_ms).is_some() {
        // One switch leaves the start line, two more per completed lap
        let laps_done = player.sides_switches.saturating_sub(1) / 2;
        format!("lap {}/{}", (laps_done + 1).min(state.laps), state.laps)
    } else {
        "ready".to_string()
    }
}
