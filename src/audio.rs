//! Audio system using Web Audio API
//!
//! Procedurally generated cues - no external files needed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use web_sys::{AudioContext, BiquadFilterType, GainNode, OscillatorNode, OscillatorType};

use crate::presenter::Cue;
use crate::settings::Settings;

/// Length of the drop noise burst (seconds)
const DROP_SECS: f64 = 0.15;

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    volume: f32,
    noise: Pcg32,
}

impl AudioManager {
    pub fn new(settings: &Settings, seed: u64) -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: settings.effective_volume(),
            noise: Pcg32::seed_from_u64(seed),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Play a cue
    pub fn play(&mut self, cue: Cue) {
        let vol = self.volume;
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = self.ctx.clone() else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match cue {
            Cue::Drop => self.play_drop(&ctx, vol),
            Cue::Zero => self.play_zero(&ctx, vol),
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

    /// Water drop - short high-passed noise burst with a fast decay
    fn play_drop(&mut self, ctx: &AudioContext, vol: f32) {
        let rate = ctx.sample_rate();
        let len = (rate as f64 * DROP_SECS) as u32;
        if len == 0 {
            return;
        }

        let mut data: Vec<f32> = (0..len)
            .map(|i| {
                let t = i as f32 / len as f32;
                let env = (1.0 - t).powi(3);
                (self.noise.random::<f32>() * 2.0 - 1.0) * 0.6 * env
            })
            .collect();

        let Some(buffer) = ctx.create_buffer(1, len, rate).ok() else {
            return;
        };
        if buffer.copy_to_channel(&mut data[..], 0).is_err() {
            return;
        }

        let Some(source) = ctx.create_buffer_source().ok() else {
            return;
        };
        source.set_buffer(Some(&buffer));

        let Some(filter) = ctx.create_biquad_filter().ok() else {
            return;
        };
        filter.set_type(BiquadFilterType::Highpass);
        filter.frequency().set_value(700.0);

        let Some(gain) = ctx.create_gain().ok() else {
            return;
        };
        let t = ctx.current_time();
        gain.gain().set_value_at_time(0.001, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.6 * vol, t + 0.005)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + DROP_SECS)
            .ok();

        if source.connect_with_audio_node(&filter).is_err()
            || filter.connect_with_audio_node(&gain).is_err()
            || gain.connect_with_audio_node(&ctx.destination()).is_err()
        {
            return;
        }

        source.start_with_when(t).ok();
        source.stop_with_when(t + DROP_SECS + 0.01).ok();
    }

    /// Zero hits - low square-wave blip
    fn play_zero(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 120.0, OscillatorType::Square) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(0.001, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.25 * vol, t + 0.02)
            .ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.001, t + 0.35)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.36).ok();
    }
}
