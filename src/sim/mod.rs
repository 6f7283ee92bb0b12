//! Pure simulation module
//!
//! All gameplay logic lives here, free of rendering and platform
//! dependencies:
//! - Frame-driven update with explicit timestamps
//! - Geometric track collision (no pixel sampling)
//! - One-shot events out, pressed-key set in

pub mod countdown;
pub mod state;
pub mod tick;
pub mod track;

pub use countdown::{Countdown, CountdownPhase};
pub use state::{GameEvent, Player, RaceState};
pub use tick::{TickInput, update};
pub use track::{Track, TrackSide};
