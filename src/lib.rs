//! Interval Timer - a work/rest/round countdown with audible phase cues
//!
//! This library provides the phase/round state machine, the tone emitter
//! that plays its cues and the host loop that ticks it.

pub mod audio;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use audio::ToneEmitter;
pub use config::Config;
pub use engine::{CueKind, CueSink, TimerEngine};
pub use error::{Error, Result};
pub use state::{IntervalConfig, Phase, TimerSnapshot};
pub use utils::signals::shutdown_signal;
