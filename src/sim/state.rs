//! Race state and core simulation types

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::countdown::Countdown;
use super::track::{Track, TrackSide};
use crate::Settings;
use crate::consts::*;

/// One-shot events produced by an update, consumed by audio/logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A counting threshold passed (0ms and 1000ms cues)
    CountdownBeep,
    /// The 2000ms threshold passed; the race is on
    StartSignal,
    /// A player left the asphalt
    PlayerCrashed { player: usize },
    /// A player completed all laps
    PlayerFinished { player: usize },
    /// Every player is terminal
    RaceFinished,
}

/// A motorcycle and its trail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// CSS color for rendering
    pub color: String,
    /// Head position
    pub head: Vec2,
    /// Trailing points, oldest first. Length is fixed at initialization.
    pub tail: Vec<Vec2>,
    /// Heading angle (radians)
    pub heading: f32,
    /// Speed in pixels per millisecond; pinned to 0 on crash/finish
    pub speed: f32,
    /// Heading change applied per update while the control key is held
    pub turn_step: f32,
    /// Key that steers this player
    pub control_key: char,
    /// Which side of the midline the head was on last update
    pub side: TrackSide,
    /// Midline crossings so far; never decreases
    pub sides_switches: u32,
    pub has_collided: bool,
    pub collided_at: Option<f64>,
    pub has_finished: bool,
    pub finished_at: Option<f64>,
}

impl Player {
    /// Place player `slot` of `total` on the starting grid.
    ///
    /// The tail starts as a straight line of `tail_len` points trailing the
    /// head to the left, oldest first.
    pub fn new(slot: usize, total: usize, track: &Track, speed: f32) -> Self {
        let head = track.start_positions(total)[slot];
        let tail_len = (track.width / TAIL_DIVISOR) as usize;

        let mut tail: Vec<Vec2> = (0..tail_len)
            .map(|i| Vec2::new(head.x - i as f32, head.y))
            .collect();
        tail.reverse();

        Self {
            color: PLAYER_COLORS[slot % PLAYER_COLORS.len()].to_string(),
            head,
            tail,
            heading: 0.0,
            speed,
            turn_step: TURN_STEP,
            control_key: PLAYER_KEYS[slot % PLAYER_KEYS.len()],
            side: track.side_of(head.x),
            sides_switches: 0,
            has_collided: false,
            collided_at: None,
            has_finished: false,
            finished_at: None,
        }
    }

    /// Crashed or finished players no longer move
    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.has_collided || self.has_finished
    }

    /// Ring-shift the tail: append the old head, drop the oldest point.
    pub fn shift_tail(&mut self, old_head: Vec2) {
        self.tail.push(old_head);
        self.tail.remove(0);
    }

    /// Mark the crash transition. Only the first call has any effect.
    pub fn crash(&mut self, now_ms: f64) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.has_collided = true;
        self.collided_at = Some(now_ms);
        self.speed = 0.0;
        true
    }

    /// Mark the finish transition. Only the first call has any effect.
    pub fn finish(&mut self, now_ms: f64) -> bool {
        if self.is_terminal() {
            return false;
        }
        self.has_finished = true;
        self.finished_at = Some(now_ms);
        self.speed = 0.0;
        true
    }
}

/// Complete race state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceState {
    /// Players in slot order
    pub players: Vec<Player>,
    /// Countdown state machine
    pub countdown: Countdown,
    /// Track geometry
    pub track: Track,
    /// Laps to race
    pub laps: u32,
    /// Timestamp of the race start (set once when the countdown completes)
    pub started_at: Option<f64>,
    /// Timestamp when the last player became terminal (set once)
    pub finished_at: Option<f64>,
    /// Previous update timestamp, for elapsed-time computation
    pub last_timestamp: f64,
}

impl RaceState {
    /// Build a fresh race in the default viewport from the settings blob.
    pub fn new(settings: &Settings) -> Self {
        Self::with_viewport(VIEW_WIDTH, VIEW_HEIGHT, settings)
    }

    /// Build a fresh race for an explicit viewport size.
    pub fn with_viewport(width: f32, height: f32, settings: &Settings) -> Self {
        let track = Track::new(width, height, settings.track_size);
        let total = settings.total_players;

        let players = (0..total)
            .map(|slot| Player::new(slot, total, &track, settings.speed))
            .collect();

        Self {
            players,
            countdown: Countdown::new(),
            track,
            laps: settings.laps,
            started_at: None,
            finished_at: None,
            last_timestamp: 0.0,
        }
    }

    /// Side switches needed to finish: one for leaving the start line, plus
    /// two per lap.
    #[inline]
    pub fn switches_to_finish(&self) -> u32 {
        1 + 2 * self.laps
    }

    /// True once every player has crashed or finished
    pub fn all_terminal(&self) -> bool {
        self.players.iter().all(Player::is_terminal)
    }

    /// Milliseconds raced so far (for the timer display)
    pub fn race_elapsed_ms(&self, now_ms: f64) -> Option<f64> {
        let start = self.started_at?;
        Some(self.finished_at.unwrap_or(now_ms) - start)
    }
}
