//! Audible cue policy near phase boundaries

/// Highest whole second that still gets a countdown cue
pub const CUE_WINDOW_SECONDS: u64 = 3;

/// Tone shape of a cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CueKind {
    /// Countdown beep for seconds 3, 2 and 1
    Short,
    /// Phase-end tone at second 0
    Long,
}

impl CueKind {
    pub const fn frequency_hz(&self) -> f32 {
        match self {
            CueKind::Short => 880.0,
            CueKind::Long => 1200.0,
        }
    }

    pub const fn duration_ms(&self) -> u32 {
        match self {
            CueKind::Short => 150,
            CueKind::Long => 600,
        }
    }
}

/// Cue to emit when the countdown shows `seconds_remaining`, if any
pub fn cue_for_second(seconds_remaining: u64) -> Option<CueKind> {
    match seconds_remaining {
        0 => Some(CueKind::Long),
        1..=CUE_WINDOW_SECONDS => Some(CueKind::Short),
        _ => None,
    }
}

/// Receiver of cue events.
///
/// Implementations must never fail loudly: a cue that cannot be played is
/// dropped and the countdown carries on.
pub trait CueSink {
    /// Prepare the output ahead of the first cue. Produces no sound.
    fn prime(&mut self) {}

    fn emit(&mut self, kind: CueKind, frequency_hz: f32);

    /// Set the master gain in 0..=1. Sinks without volume ignore it.
    fn set_volume(&mut self, _volume: f32) {}
}

/// Sink that discards every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl CueSink for SilentSink {
    fn emit(&mut self, _kind: CueKind, _frequency_hz: f32) {}
}

impl<S: CueSink + ?Sized> CueSink for Box<S> {
    fn prime(&mut self) {
        (**self).prime();
    }

    fn emit(&mut self, kind: CueKind, frequency_hz: f32) {
        (**self).emit(kind, frequency_hz);
    }

    fn set_volume(&mut self, volume: f32) {
        (**self).set_volume(volume);
    }
}
