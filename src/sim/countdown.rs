//! Pre-race countdown state machine
//!
//! Idle until the start key, then three time thresholds (0ms, 1000ms, 2000ms)
//! each fire once: two counting beeps, then the start signal. The 2000ms
//! threshold transitions to `Started`.

use serde::{Deserialize, Serialize};

use super::state::GameEvent;
use crate::consts::{COUNT_GO_MS, COUNT_ONE_MS, COUNT_TWO_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CountdownPhase {
    #[default]
    Idle,
    Counting,
    Started,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Countdown {
    pub phase: CountdownPhase,
    /// Timestamp the countdown began (valid once counting)
    pub counting_started_at: f64,
    /// One-shot flags, one per threshold; drive the rendered digits too
    pub one_passed: bool,
    pub two_passed: bool,
    pub go_passed: bool,
}

impl Countdown {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        self.phase == CountdownPhase::Idle
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        self.phase == CountdownPhase::Started
    }

    /// Idle -> Counting. No effect in any other phase.
    pub fn begin(&mut self, now_ms: f64) {
        if self.phase == CountdownPhase::Idle {
            self.phase = CountdownPhase::Counting;
            self.counting_started_at = now_ms;
        }
    }

    /// Advance past any thresholds reached by `now_ms`, emitting each cue
    /// exactly once. Returns true on the Counting -> Started transition.
    pub fn advance(&mut self, now_ms: f64, events: &mut Vec<GameEvent>) -> bool {
        if self.phase != CountdownPhase::Counting {
            return false;
        }

        let elapsed = now_ms - self.counting_started_at;

        if elapsed > COUNT_ONE_MS && !self.one_passed {
            self.one_passed = true;
            events.push(GameEvent::CountdownBeep);
        }
        if elapsed > COUNT_TWO_MS && !self.two_passed {
            self.two_passed = true;
            events.push(GameEvent::CountdownBeep);
        }
        if elapsed > COUNT_GO_MS && !self.go_passed {
            self.go_passed = true;
            self.phase = CountdownPhase::Started;
            events.push(GameEvent::StartSignal);
            return true;
        }

        false
    }
}
