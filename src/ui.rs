//! Settings menu wiring
//!
//! The menu itself is plain HTML range inputs; this module hydrates them from
//! the stored settings and writes the blob back whenever one changes. The new
//! values take effect on the next race.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::HtmlInputElement;

use crate::Settings;

const INPUT_IDS: [&str; 4] = ["game-speed", "track-size", "total-players", "laps"];

fn input_by_id(id: &str) -> Option<HtmlInputElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(id)?
        .dyn_into()
        .ok()
}

/// Parse a single input's value, keeping `fallback` on missing/garbage input
fn parse_or<T: std::str::FromStr>(id: &str, fallback: T) -> T {
    input_by_id(id)
        .and_then(|el| el.value().parse().ok())
        .unwrap_or(fallback)
}

/// Read the current menu values, falling back per-field to defaults
pub fn read_settings() -> Settings {
    let defaults = Settings::default();
    Settings {
        speed: parse_or("game-speed", defaults.speed),
        track_size: parse_or("track-size", defaults.track_size),
        total_players: parse_or("total-players", defaults.total_players),
        laps: parse_or("laps", defaults.laps),
    }
}

/// Push stored settings into the menu inputs
pub fn hydrate_inputs(settings: &Settings) {
    let values = [
        ("game-speed", settings.speed.to_string()),
        ("track-size", settings.track_size.to_string()),
        ("total-players", settings.total_players.to_string()),
        ("laps", settings.laps.to_string()),
    ];
    for (id, value) in values {
        if let Some(el) = input_by_id(id) {
            el.set_value(&value);
        }
    }
}

/// Persist the blob whenever any menu input changes
pub fn bind_inputs() {
    for id in INPUT_IDS {
        let Some(el) = input_by_id(id) else {
            log::warn!("settings input #{id} not found");
            continue;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            read_settings().save();
        });
        let _ = el.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
