//! Per-frame simulation update
//!
//! One `update` per animation frame. All movement is elapsed-time based; the
//! steering rotation is applied once per update like the rest of the game's
//! frame-driven input.

use crate::consts::START_KEY;
use crate::heading_to_vec;

use super::state::{GameEvent, RaceState};

/// Currently-held keys, lowercased. Fed by keydown/keyup outside the sim.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pressed: Vec<String>,
}

impl TickInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: &str) {
        let key = key.to_lowercase();
        if !self.pressed.contains(&key) {
            self.pressed.push(key);
        }
    }

    pub fn release(&mut self, key: &str) {
        let key = key.to_lowercase();
        self.pressed.retain(|k| *k != key);
    }

    pub fn is_pressed(&self, key: &str) -> bool {
        let key = key.to_lowercase();
        self.pressed.iter().any(|k| *k == key)
    }

    pub fn is_char_pressed(&self, key: char) -> bool {
        let mut buf = [0u8; 4];
        self.is_pressed(key.encode_utf8(&mut buf))
    }
}

/// Advance the race by one frame.
///
/// `timestamp_ms` is the frame timestamp (monotonic, e.g. from
/// requestAnimationFrame). Returns the one-shot events this frame produced.
/// The frame on which the countdown completes already moves the players.
pub fn update(state: &mut RaceState, input: &TickInput, timestamp_ms: f64) -> Vec<GameEvent> {
    let elapsed_ms = (timestamp_ms - state.last_timestamp).max(0.0) as f32;
    state.last_timestamp = timestamp_ms;

    let mut events = Vec::new();

    if state.countdown.advance(timestamp_ms, &mut events) {
        state.started_at = Some(timestamp_ms);
        log::info!("race started");
    }

    if state.countdown.is_idle() && input.is_pressed(START_KEY) {
        state.countdown.begin(timestamp_ms);
        log::info!("countdown started");
    }

    if !state.countdown.is_started() {
        return events;
    }

    let switches_to_finish = state.switches_to_finish();

    for (index, player) in state.players.iter_mut().enumerate() {
        if player.is_terminal() {
            continue;
        }

        let old_head = player.head;
        player.shift_tail(old_head);

        if input.is_char_pressed(player.control_key) {
            player.heading += player.turn_step;
        }

        player.head = old_head + heading_to_vec(player.heading, player.speed * elapsed_ms);

        if !state.track.contains(player.head) {
            player.crash(timestamp_ms);
            events.push(GameEvent::PlayerCrashed { player: index });
            log::info!("player {index} crashed");
            continue;
        }

        let side = state.track.side_of(player.head.x);
        if side != player.side {
            player.side = side;
            player.sides_switches += 1;

            if player.sides_switches == switches_to_finish {
                player.finish(timestamp_ms);
                events.push(GameEvent::PlayerFinished { player: index });
                log::info!("player {index} finished");
            }
        }
    }

    if state.finished_at.is_none() && state.all_terminal() {
        state.finished_at = Some(timestamp_ms);
        events.push(GameEvent::RaceFinished);
        log::info!("race finished");
    }

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::TrackSide;

    const FRAME_MS: f64 = 16.0;

    fn state() -> RaceState {
        RaceState::new(&Settings::default())
    }

    /// Run the countdown to completion with 16ms frames. Returns the state
    /// and the timestamp of the last frame (the one that started the race and
    /// moved every player once).
    fn started_state() -> (RaceState, f64) {
        let mut state = state();
        let mut input = TickInput::new();
        input.press("Enter");
        let mut t = 0.0;
        while !state.countdown.is_started() {
            t += FRAME_MS;
            update(&mut state, &input, t);
        }
        (state, t)
    }

    #[test]
    fn test_no_movement_before_start() {
        let mut state = state();
        let input = TickInput::new();
        let heads: Vec<_> = state.players.iter().map(|p| p.head).collect();
        for frame in 1..10 {
            update(&mut state, &input, frame as f64 * FRAME_MS);
        }
        for (player, head) in state.players.iter().zip(heads) {
            assert_eq!(player.head, head);
        }
    }

    #[test]
    fn test_enter_begins_countdown_and_beeps() {
        let mut state = state();
        let mut input = TickInput::new();
        input.press("Enter");

        let events = update(&mut state, &input, 100.0);
        assert!(events.is_empty());
        assert!(!state.countdown.is_idle());

        let events = update(&mut state, &input, 150.0);
        assert_eq!(events, vec![GameEvent::CountdownBeep]);

        update(&mut state, &input, 1200.0);
        let events = update(&mut state, &input, 2200.0);
        assert!(events.contains(&GameEvent::StartSignal));
        assert_eq!(state.started_at, Some(2200.0));
    }

    #[test]
    fn test_start_frame_moves_players_rightward() {
        let (state, _) = started_state();
        let fresh = RaceState::new(&Settings::default());
        for (player, start) in state.players.iter().zip(&fresh.players) {
            assert!(player.head.x > start.head.x);
            assert_eq!(player.head.y, start.head.y);
        }
    }

    #[test]
    fn test_tail_length_constant_and_follows_head() {
        let (mut state, mut t) = started_state();
        let input = TickInput::new();
        let len = state.players[0].tail.len();
        for _ in 0..50 {
            t += FRAME_MS;
            update(&mut state, &input, t);
            assert_eq!(state.players[0].tail.len(), len);
        }
        // Newest tail point is the previous head
        let prev_head = state.players[0].head;
        t += FRAME_MS;
        update(&mut state, &input, t);
        assert_eq!(*state.players[0].tail.last().unwrap(), prev_head);
    }

    #[test]
    fn test_holding_key_turns_only_that_player() {
        let (mut state, t) = started_state();
        let mut input = TickInput::new();
        input.press("q");
        let heading = state.players[0].heading;
        update(&mut state, &input, t + FRAME_MS);
        assert!(state.players[0].heading < heading);
        assert_eq!(state.players[1].heading, 0.0);
    }

    #[test]
    fn test_start_line_crossing_counts_first_switch() {
        // Players spawn on the midline (side Left); the first moved frame
        // carries them onto the right side.
        let (state, _) = started_state();
        assert_eq!(state.players[0].side, TrackSide::Right);
        assert_eq!(state.players[0].sides_switches, 1);
    }

    #[test]
    fn test_straight_line_ends_in_crash() {
        // Without steering every player runs off the right curve eventually
        let (mut state, mut t) = started_state();
        let input = TickInput::new();
        let mut crashed = false;
        for _ in 0..20_000 {
            t += FRAME_MS;
            let events = update(&mut state, &input, t);
            if events
                .iter()
                .any(|e| matches!(e, GameEvent::PlayerCrashed { player: 0 }))
            {
                crashed = true;
                break;
            }
        }
        assert!(crashed);
        let player = &state.players[0];
        assert!(player.has_collided);
        assert_eq!(player.speed, 0.0);
        assert!(player.collided_at.is_some());
        assert!(!state.track.contains(player.head));
    }

    #[test]
    fn test_terminal_player_freezes() {
        let (mut state, mut t) = started_state();
        let input = TickInput::new();
        state.players[0].crash(t);
        let head = state.players[0].head;
        let tail = state.players[0].tail.clone();
        for _ in 0..100 {
            t += FRAME_MS;
            update(&mut state, &input, t);
        }
        assert_eq!(state.players[0].head, head);
        assert_eq!(state.players[0].tail, tail);
        assert_eq!(state.players[0].speed, 0.0);
    }

    #[test]
    fn test_finish_after_required_switches() {
        let (mut state, mut t) = started_state();
        state.laps = 1;
        let input = TickInput::new();

        // The start frame left player 0 on the right side with one switch.
        // Teleport the head across the midline with speed 0; the updater only
        // looks at side changes, so each hop is one switch.
        state.players[0].speed = 0.0;
        assert_eq!(state.players[0].sides_switches, 1);

        let mid = state.track.midline_x();
        let y = state.players[0].head.y;
        for (i, x) in [mid - 50.0, mid + 50.0].iter().enumerate() {
            t += FRAME_MS;
            state.players[0].head = glam::Vec2::new(*x, y);
            let events = update(&mut state, &input, t);
            let expected = i as u32 + 2;
            assert_eq!(state.players[0].sides_switches, expected);
            if expected == 3 {
                assert!(events.contains(&GameEvent::PlayerFinished { player: 0 }));
            }
        }
        let player = &state.players[0];
        assert!(player.has_finished);
        assert!(player.finished_at.is_some());
        assert_eq!(player.speed, 0.0);
        assert!(!player.has_collided);

        // Switch count freezes at the finish
        t += FRAME_MS;
        update(&mut state, &input, t);
        assert_eq!(state.players[0].sides_switches, 3);
    }

    #[test]
    fn test_race_finishes_exactly_when_all_terminal() {
        let (mut state, t) = started_state();
        let input = TickInput::new();
        let total = state.players.len();

        for i in 0..total - 1 {
            state.players[i].crash(t);
        }
        let events = update(&mut state, &input, t + FRAME_MS);
        assert!(!events.contains(&GameEvent::RaceFinished));
        assert!(state.finished_at.is_none());

        state.players[total - 1].crash(t + FRAME_MS);
        let events = update(&mut state, &input, t + 2.0 * FRAME_MS);
        assert!(events.contains(&GameEvent::RaceFinished));
        assert_eq!(state.finished_at, Some(t + 2.0 * FRAME_MS));

        // Set exactly once
        let events = update(&mut state, &input, t + 3.0 * FRAME_MS);
        assert!(!events.contains(&GameEvent::RaceFinished));
        assert_eq!(state.finished_at, Some(t + 2.0 * FRAME_MS));
    }
}
