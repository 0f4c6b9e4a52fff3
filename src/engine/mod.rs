//! Timer engine module
//!
//! The phase/round state machine, its cue policy and the deferred
//! transition that follows every zero-crossing.

pub mod cue;
pub mod grace;
pub mod timer_engine;

// Re-export main types
pub use cue::{cue_for_second, CueKind, CueSink, SilentSink, CUE_WINDOW_SECONDS};
pub use grace::{GraceTimer, GRACE_DELAY_MS};
pub use timer_engine::TimerEngine;
