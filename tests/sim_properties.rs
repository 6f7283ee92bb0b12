//! Property tests for the simulation invariants
//!
//! Drives the updater with arbitrary frame timings and key holds and checks
//! the invariants that must survive any input sequence.

use proptest::prelude::*;

use moto_trails::Settings;
use moto_trails::sim::{RaceState, TickInput, Track, update};

/// One animation frame: duration plus which keys are held during it
#[derive(Debug, Clone)]
struct Frame {
    dt: f64,
    steer: [bool; 4],
    enter: bool,
}

fn frame_strategy() -> impl Strategy<Value = Frame> {
    (1.0f64..50.0, proptest::array::uniform4(any::<bool>()), any::<bool>()).prop_map(
        |(dt, steer, enter)| Frame { dt, steer, enter },
    )
}

const STEER_KEYS: [&str; 4] = ["q", "/", "v", "u"];

proptest! {
    #[test]
    fn invariants_hold_across_any_frame_sequence(
        frames in proptest::collection::vec(frame_strategy(), 1..400),
    ) {
        let mut state = RaceState::new(&Settings::default());
        let mut t = 0.0;

        for frame in &frames {
            t += frame.dt;

            let mut input = TickInput::new();
            if frame.enter {
                input.press("Enter");
            }
            for (key, held) in STEER_KEYS.iter().zip(frame.steer) {
                if held {
                    input.press(key);
                }
            }

            let prev: Vec<_> = state
                .players
                .iter()
                .map(|p| (p.tail.len(), p.sides_switches, p.is_terminal(), p.head))
                .collect();
            let prev_finished_at = state.finished_at;

            update(&mut state, &input, t);

            for (player, (tail_len, switches, was_terminal, head)) in
                state.players.iter().zip(prev)
            {
                // Tail length fixed at initialization
                prop_assert_eq!(player.tail.len(), tail_len);
                // Side switches never decrease
                prop_assert!(player.sides_switches >= switches);
                // Terminal players are frozen
                if was_terminal {
                    prop_assert_eq!(player.head, head);
                    prop_assert_eq!(player.speed, 0.0);
                }
                // Collided and finished are mutually exclusive
                prop_assert!(!(player.has_collided && player.has_finished));
                // A finished player stopped at exactly the required switches
                if player.has_finished {
                    prop_assert_eq!(player.sides_switches, state.switches_to_finish());
                    prop_assert!(player.finished_at.is_some());
                }
                if player.has_collided {
                    prop_assert!(player.collided_at.is_some());
                }
            }

            // The race finish timestamp is set exactly when all players are
            // terminal, and never moves afterwards
            prop_assert_eq!(state.finished_at.is_some(), state.all_terminal());
            if prev_finished_at.is_some() {
                prop_assert_eq!(state.finished_at, prev_finished_at);
            }
        }
    }

    #[test]
    fn start_positions_are_always_on_asphalt(
        n in 1usize..16,
        size in 1.2f32..5.0,
        width in 600.0f32..2000.0,
    ) {
        let track = Track::new(width, width / 2.0, size);
        for p in track.start_positions(n) {
            prop_assert!(track.contains(p), "start position {:?} off track", p);
        }
    }

    #[test]
    fn infield_and_outside_are_never_asphalt(
        size in 1.2f32..5.0,
        x in -100.0f32..1300.0,
    ) {
        let track = Track::new(1200.0, 600.0, size);
        // Centreline of the infield
        prop_assert!(!track.contains(glam::Vec2::new(
            x.clamp(track.straight_left(), track.straight_right()),
            track.height / 2.0,
        )));
        // Above and below the viewport
        prop_assert!(!track.contains(glam::Vec2::new(x, -1.0)));
        prop_assert!(!track.contains(glam::Vec2::new(x, track.height + 1.0)));
    }
}
