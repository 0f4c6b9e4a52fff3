//! Audio module
//!
//! Cue tones: envelope shaping, voice mixing and the cpal output they play on.

pub mod emitter;
pub mod envelope;
pub mod mixer;
pub mod output;

// Re-export main types
pub use emitter::{OutputOpener, ToneEmitter};
pub use envelope::envelope_gain;
pub use mixer::{Mixer, Voice};
pub use output::ToneOutput;
