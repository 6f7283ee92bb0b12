//! Moto Trails - an oval-track motorcycle racing game
//!
//! Core modules:
//! - `sim`: Pure simulation (player movement, track collision, lap counting)
//! - `renderer`: Canvas2D rendering (wasm)
//! - `audio`: Web Audio beep cues (wasm)
//! - `settings`: Flat settings blob with LocalStorage persistence
//! - `ui`: Settings menu wiring (wasm)

pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod audio;
#[cfg(target_arch = "wasm32")]
pub mod renderer;
#[cfg(target_arch = "wasm32")]
pub mod ui;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default viewport size the track is laid out in (CSS pixels)
    pub const VIEW_WIDTH: f32 = 1200.0;
    pub const VIEW_HEIGHT: f32 = 600.0;

    /// Heading change per update while the control key is held (radians)
    pub const TURN_STEP: f32 = -std::f32::consts::PI / 200.0;

    /// Square drawn for the head and each tail point (pixels)
    pub const PLAYER_THICKNESS: f32 = 4.0;

    /// Tail length as a fraction of viewport width
    pub const TAIL_DIVISOR: f32 = 70.0;

    /// Countdown thresholds (ms since counting began)
    pub const COUNT_ONE_MS: f64 = 0.0;
    pub const COUNT_TWO_MS: f64 = 1000.0;
    pub const COUNT_GO_MS: f64 = 2000.0;

    /// Per-slot player colors (CSS)
    pub const PLAYER_COLORS: [&str; 8] = [
        "#f00", "#0f0", "#00f", "#ff0", "#f0f", "#0ff", "#fff", "#000",
    ];

    /// Per-slot control keys
    pub const PLAYER_KEYS: [char; 8] = ['q', '/', 'v', 'u', 'z', 'm', 'r', ']'];

    /// Key that starts the countdown
    pub const START_KEY: &str = "enter";
}

/// Displacement for a heading angle and distance
#[inline]
pub fn heading_to_vec(heading: f32, distance: f32) -> Vec2 {
    Vec2::new(distance * heading.cos(), distance * heading.sin())
}
