//! Audio cues using the Web Audio API
//!
//! Short procedurally generated beeps, no external files. Every cue is
//! fire-and-forget: start the oscillator, schedule a timed stop.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Counting threshold passed
    CountdownBeep,
    /// Race start signal
    StartSignal,
    /// Player left the track
    Crash,
    /// Player completed all laps
    Finish,
}

impl SoundEffect {
    /// Map a simulation event to its cue, if it has one
    pub fn for_event(event: GameEvent) -> Option<Self> {
        match event {
            GameEvent::CountdownBeep => Some(Self::CountdownBeep),
            GameEvent::StartSignal => Some(Self::StartSignal),
            GameEvent::PlayerCrashed { .. } => Some(Self::Crash),
            GameEvent::PlayerFinished { .. } => Some(Self::Finish),
            GameEvent::RaceFinished => None,
        }
    }
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: 0.5,
            muted: false,
        }
    }

    pub fn set_volume(&mut self, vol: f32) {
        self.volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        if self.muted || self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::CountdownBeep => self.play_note(ctx, 659.0, 0.032),
            SoundEffect::StartSignal => self.play_note(ctx, 987.0, 0.004),
            SoundEffect::Crash => self.play_crash(ctx),
            SoundEffect::Finish => self.play_finish(ctx),
        }
    }

    /// Create an oscillator routed through a gain node
    fn create_osc(
        &self,
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    /// Flat square-wave note with a timed stop
    fn play_note(&self, ctx: &AudioContext, freq: f32, duration_secs: f64) {
        let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value(self.volume * 0.4);

        osc.start().ok();
        osc.stop_with_when(t + duration_secs).ok();
    }

    /// Crash - descending groan
    fn play_crash(&self, ctx: &AudioContext) {
        let Some((osc, gain)) = self.create_osc(ctx, 220.0, OscillatorType::Sawtooth) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(self.volume * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        osc.frequency().set_value_at_time(220.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(55.0, t + 0.3)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.35).ok();
    }

    /// Finish - short ascending fanfare
    fn play_finish(&self, ctx: &AudioContext) {
        for (i, freq) in [523.0, 659.0, 784.0].iter().enumerate() {
            let delay = i as f64 * 0.1;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(self.volume * 0.35, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.3).ok();
            }
        }
    }
}
