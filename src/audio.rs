//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::{EndReason, GameEvent};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Run started
    Start,
    /// Jump impulse
    Flap,
    /// Pipe passed
    Score,
    /// Hit a pipe
    Crash,
    /// Dropped through the floor
    Fall,
}

impl SoundEffect {
    /// The cue for a game event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Started => Some(SoundEffect::Start),
            GameEvent::Flapped => Some(SoundEffect::Flap),
            GameEvent::Scored { .. } => Some(SoundEffect::Score),
            GameEvent::Ended {
                reason: EndReason::Collision,
                ..
            } => Some(SoundEffect::Crash),
            GameEvent::Ended {
                reason: EndReason::FellOffScreen,
                ..
            } => Some(SoundEffect::Fall),
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
        // May fail outside a secure context
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: 0.6,
            muted: false,
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        if self.muted {
            return;
        }
        let Some(ctx) = &self.ctx else { return };

        // Browsers keep the context suspended until a user gesture
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let vol = self.volume;
        match effect {
            SoundEffect::Start => self.play_start(ctx, vol),
            SoundEffect::Flap => self.play_flap(ctx, vol),
            SoundEffect::Score => self.play_score(ctx, vol),
            SoundEffect::Crash => self.play_crash(ctx, vol),
            SoundEffect::Fall => self.play_fall(ctx, vol),
        }
    }

    /// Create an oscillator with gain envelope
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

    /// Frequency sweep from `from` to `to` over `dur` seconds
    fn sweep(
        &self,
        ctx: &AudioContext,
        osc_type: OscillatorType,
        from: f32,
        to: f32,
        dur: f64,
        vol: f32,
    ) {
        let Some((osc, gain)) = self.create_osc(ctx, from, osc_type) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + dur)
            .ok();
        osc.frequency().set_value_at_time(from, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(to, t + dur)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + dur + 0.02).ok();
    }

    /// Start - two rising notes
    fn play_start(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        for (i, freq) in [523.0, 784.0].into_iter().enumerate() {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) else {
                continue;
            };
            let start = t + i as f64 * 0.08;
            gain.gain().set_value_at_time(0.0, t).ok();
            gain.gain().set_value_at_time(vol * 0.15, start).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, start + 0.1)
                .ok();
            osc.start_with_when(start).ok();
            osc.stop_with_when(start + 0.12).ok();
        }
    }

    /// Flap - short upward chirp
    fn play_flap(&self, ctx: &AudioContext, vol: f32) {
        self.sweep(ctx, OscillatorType::Square, 300.0, 600.0, 0.08, vol * 0.15);
    }

    /// Score - coin ding
    fn play_score(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();
        let Some((osc, gain)) = self.create_osc(ctx, 988.0, OscillatorType::Square) else {
            return;
        };
        gain.gain().set_value_at_time(vol * 0.2, t).ok();
        osc.frequency().set_value_at_time(988.0, t).ok();
        osc.frequency().set_value_at_time(1319.0, t + 0.07).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.3)
            .ok();
        osc.start().ok();
        osc.stop_with_when(t + 0.32).ok();
    }

    /// Crash - harsh downward buzz
    fn play_crash(&self, ctx: &AudioContext, vol: f32) {
        self.sweep(ctx, OscillatorType::Sawtooth, 400.0, 80.0, 0.4, vol * 0.3);
    }

    /// Fall - long slide down
    fn play_fall(&self, ctx: &AudioContext, vol: f32) {
        self.sweep(ctx, OscillatorType::Triangle, 700.0, 60.0, 0.6, vol * 0.35);
    }
}
