//! Audio system using Web Audio API
//!
//! Procedurally generated: a looping ambient drone and a one-shot alert
//! sting. No external files needed. Every failure here is logged and
//! dropped; the game runs silent if the browser refuses audio.

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::sim::GameEvent;

/// Nodes of the running ambient loop
struct AmbientLoop {
    oscillators: Vec<OscillatorNode>,
    gain: GainNode,
}

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    master_volume: f32,
    ambient: Option<AmbientLoop>,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            master_volume: 0.8,
            ambient: None,
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    /// Carry out the audio half of a simulation event
    pub fn handle(&mut self, event: GameEvent) {
        match event {
            GameEvent::StartAmbient => self.start_ambient(),
            GameEvent::StopAmbient => self.stop_ambient(),
            GameEvent::PlayAlert => self.play_alert(),
            _ => {}
        }
    }

    /// Start the ambient loop from the top; no-op if already playing
    pub fn start_ambient(&mut self) {
        if self.ambient.is_some() {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        let vol = self.master_volume;

        let Some(gain) = ctx.create_gain().ok() else {
            log::warn!("Ambient loop unavailable");
            return;
        };
        gain.gain().set_value(vol * 0.18);
        if gain.connect_with_audio_node(&ctx.destination()).is_err() {
            log::warn!("Ambient loop could not reach the output");
            return;
        }

        // Two detuned low sines beat against each other; a triangle an
        // octave up adds body
        let mut oscillators = Vec::with_capacity(4);
        for (freq, osc_type) in [
            (55.0, OscillatorType::Sine),
            (55.7, OscillatorType::Sine),
            (110.0, OscillatorType::Triangle),
        ] {
            let Some(osc) = ctx.create_oscillator().ok() else {
                continue;
            };
            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            if osc.connect_with_audio_node(&gain).is_ok() && osc.start().is_ok() {
                oscillators.push(osc);
            }
        }

        // Slow swell on the loop volume
        if let Some((lfo, depth)) = self.create_lfo(ctx, 0.15, vol * 0.08) {
            if depth.connect_with_audio_param(&gain.gain()).is_ok() && lfo.start().is_ok() {
                oscillators.push(lfo);
            }
        }

        log::debug!("Ambient loop started ({} oscillators)", oscillators.len());
        self.ambient = Some(AmbientLoop { oscillators, gain });
    }

    /// Stop the ambient loop; the next start begins from scratch
    pub fn stop_ambient(&mut self) {
        let Some(ambient) = self.ambient.take() else {
            return;
        };
        for osc in &ambient.oscillators {
            let _ = osc.stop();
        }
        let _ = ambient.gain.disconnect();
        log::debug!("Ambient loop stopped");
    }

    /// One-shot alert sting
    pub fn play_alert(&self) {
        let vol = self.master_volume;
        if vol <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        let t = ctx.current_time();

        // Screeching downward sweep
        if let Some((osc, gain)) = self.create_osc(ctx, 1800.0, OscillatorType::Sawtooth) {
            gain.gain().set_value_at_time(vol * 0.6, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.9)
                .ok();
            osc.frequency().set_value_at_time(1800.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(80.0, t + 0.8)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.95).ok();
        }

        // Harsh square stabs on top
        if let Some((osc, gain)) = self.create_osc(ctx, 2400.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.4)
                .ok();
            osc.frequency().set_value_at_time(2400.0, t).ok();
            osc.frequency().set_value_at_time(900.0, t + 0.05).ok();
            osc.frequency().set_value_at_time(3100.0, t + 0.1).ok();
            osc.frequency().set_value_at_time(700.0, t + 0.15).ok();
            osc.frequency().set_value_at_time(2700.0, t + 0.2).ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.45).ok();
        }

        // Sub thump
        if let Some((osc, gain)) = self.create_osc(ctx, 50.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.7, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.5)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.55).ok();
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

    /// Low-frequency oscillator scaled by a depth gain (not connected to output)
    fn create_lfo(
        &self,
        ctx: &AudioContext,
        freq: f32,
        depth: f32,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(OscillatorType::Sine);
        osc.frequency().set_value(freq);
        gain.gain().set_value(depth);
        osc.connect_with_audio_node(&gain).ok()?;

        Some((osc, gain))
    }
}
