//! Voice mixing shared between the emitter and the output callback

use std::{f32::consts::TAU, sync::Arc};

use parking_lot::Mutex;

use super::envelope::envelope_gain;

/// One independent sine tone with its own envelope
#[derive(Debug, Clone)]
pub struct Voice {
    frequency_hz: f32,
    duration_secs: f32,
    sample_rate: f32,
    position: u64,
    phase: f32,
}

impl Voice {
    pub fn new(frequency_hz: f32, duration_ms: u32, sample_rate: u32) -> Self {
        Self {
            frequency_hz,
            duration_secs: duration_ms as f32 / 1000.0,
            sample_rate: sample_rate.max(1) as f32,
            position: 0,
            phase: 0.0,
        }
    }

    /// Next mono sample, enveloped, before master gain
    pub fn next_sample(&mut self) -> f32 {
        if self.is_finished() {
            return 0.0;
        }
        let t = self.position as f32 / self.sample_rate;
        let sample = (self.phase * TAU).sin() * envelope_gain(t, self.duration_secs);

        self.phase = (self.phase + self.frequency_hz / self.sample_rate).fract();
        self.position += 1;
        sample
    }

    pub fn is_finished(&self) -> bool {
        self.position as f32 / self.sample_rate >= self.duration_secs
    }
}

/// Set of playing voices. Clones share the same voices.
#[derive(Debug, Clone, Default)]
pub struct Mixer {
    voices: Arc<Mutex<Vec<Voice>>>,
}

impl Mixer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, voice: Voice) {
        self.voices.lock().push(voice);
    }

    pub fn active_voices(&self) -> usize {
        self.voices.lock().len()
    }

    /// Fill interleaved `data` with the sum of all voices scaled by
    /// `master_gain`, then drop the voices that have finished.
    pub fn render(&self, data: &mut [f32], channels: usize, master_gain: f32) {
        let channels = channels.max(1);
        let mut voices = self.voices.lock();

        for frame in data.chunks_mut(channels) {
            let mixed: f32 = voices.iter_mut().map(Voice::next_sample).sum();
            let s = mixed * master_gain;
            // Soft clipping for overlapping tones
            let limited = if s.abs() > 0.9 { s.tanh() } else { s };
            frame.fill(limited);
        }

        voices.retain(|voice| !voice.is_finished());
    }
}
