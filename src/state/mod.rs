//! State management module
//!
//! This module contains the run state, the interval configuration and the
//! snapshots renderers read.

pub mod interval_config;
pub mod run_state;
pub mod snapshot;

// Re-export main types
pub use interval_config::{commit_field, ConfigField, ConfigForm, IntervalConfig};
pub use run_state::{CueMemory, Phase, RunState};
pub use snapshot::{seconds_remaining, TimerSnapshot};
