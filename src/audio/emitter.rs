//! Tone emitter with a lazily opened output sink

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use super::{Mixer, ToneOutput, Voice};
use crate::engine::{CueKind, CueSink};
use crate::error::Result;

/// Function that opens the output sink for a mixer and master gain
pub type OutputOpener = fn(Mixer, Arc<Mutex<f32>>) -> Result<ToneOutput>;

enum SinkState {
    Uninitialized,
    Ready(ToneOutput),
    /// Opening failed once; cues are dropped from now on
    Unavailable,
}

/// Plays cue tones.
///
/// The output sink is created on first use. If that fails the emitter keeps
/// working as a silent sink.
pub struct ToneEmitter {
    sink: SinkState,
    opener: OutputOpener,
    mixer: Mixer,
    volume: Arc<Mutex<f32>>,
}

impl ToneEmitter {
    /// Create an emitter for the default output device
    pub fn new(volume: f32) -> Self {
        Self::with_opener(volume, ToneOutput::open)
    }

    pub fn with_opener(volume: f32, opener: OutputOpener) -> Self {
        Self {
            sink: SinkState::Uninitialized,
            opener,
            mixer: Mixer::new(),
            volume: Arc::new(Mutex::new(clamp_volume(volume))),
        }
    }

    pub fn volume(&self) -> f32 {
        *self.volume.lock()
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.sink, SinkState::Ready(_))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self.sink, SinkState::Unavailable)
    }

    /// Play a tone of `kind` at `frequency_hz`. Each call adds an independent voice.
    pub fn play(&mut self, kind: CueKind, frequency_hz: f32) {
        let Some(sample_rate) = self.ensure_sink() else {
            debug!("No audio output, dropping {:?} cue", kind);
            return;
        };
        self.mixer
            .add(Voice::new(frequency_hz, kind.duration_ms(), sample_rate));
    }

    /// Open the sink if needed and return its sample rate
    fn ensure_sink(&mut self) -> Option<u32> {
        if let SinkState::Uninitialized = self.sink {
            self.sink = match (self.opener)(self.mixer.clone(), Arc::clone(&self.volume)) {
                Ok(output) => SinkState::Ready(output),
                Err(e) => {
                    warn!("Audio output unavailable, cues disabled: {}", e);
                    SinkState::Unavailable
                }
            };
        }

        match &self.sink {
            SinkState::Ready(output) => Some(output.sample_rate()),
            _ => None,
        }
    }
}

impl CueSink for ToneEmitter {
    fn prime(&mut self) {
        self.ensure_sink();
    }

    fn emit(&mut self, kind: CueKind, frequency_hz: f32) {
        self.play(kind, frequency_hz);
    }

    /// Clamped to 0..=1; applies to tones already playing too
    fn set_volume(&mut self, volume: f32) {
        let volume = clamp_volume(volume);
        *self.volume.lock() = volume;
        debug!("Cue volume set to {:.2}", volume);
    }
}

fn clamp_volume(volume: f32) -> f32 {
    if volume.is_nan() {
        0.0
    } else {
        volume.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn no_device(_mixer: Mixer, _volume: Arc<Mutex<f32>>) -> Result<ToneOutput> {
        Err(Error::NoOutputDevice)
    }

    #[test]
    fn test_sink_is_lazy() {
        let emitter = ToneEmitter::with_opener(0.5, no_device);
        assert!(!emitter.is_ready());
        assert!(!emitter.is_unavailable());
    }

    #[test]
    fn test_failed_sink_drops_cues() {
        let mut emitter = ToneEmitter::with_opener(0.5, no_device);
        emitter.prime();
        assert!(emitter.is_unavailable());

        emitter.emit(CueKind::Short, CueKind::Short.frequency_hz());
        emitter.emit(CueKind::Long, CueKind::Long.frequency_hz());
        assert_eq!(emitter.mixer.active_voices(), 0);
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut emitter = ToneEmitter::with_opener(3.0, no_device);
        assert_eq!(emitter.volume(), 1.0);
        emitter.set_volume(-0.2);
        assert_eq!(emitter.volume(), 0.0);
        emitter.set_volume(0.25);
        assert_eq!(emitter.volume(), 0.25);
    }
}
