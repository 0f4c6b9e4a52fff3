//! Read-only timer snapshot handed to renderers

use serde::Serialize;

use super::{IntervalConfig, Phase, RunState};

/// Point-in-time view of a run plus the configuration it runs with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub running: bool,
    pub paused: bool,
    pub current_round: u32,
    pub remaining_ms: f64,
    pub config: IntervalConfig,
}

impl TimerSnapshot {
    pub fn new(state: &RunState, config: IntervalConfig) -> Self {
        Self {
            phase: state.phase,
            running: state.running,
            paused: state.paused,
            current_round: state.current_round,
            remaining_ms: state.remaining_ms,
            config,
        }
    }

    /// Duration of the current phase, 1 when Idle so progress never divides by zero
    pub fn phase_duration_ms(&self) -> f64 {
        let duration = self.config.phase_duration_ms(self.phase);
        if self.phase == Phase::Idle || duration <= 0.0 {
            1.0
        } else {
            duration
        }
    }

    /// Fraction of the current phase already elapsed, in [0, 1]
    pub fn progress(&self) -> f64 {
        (1.0 - self.remaining_ms / self.phase_duration_ms()).clamp(0.0, 1.0)
    }

    pub fn seconds_remaining(&self) -> u64 {
        seconds_remaining(self.remaining_ms)
    }

    /// Countdown as `M:SS`
    pub fn countdown_label(&self) -> String {
        let seconds = self.seconds_remaining();
        format!("{}:{:02}", seconds / 60, seconds % 60)
    }

    pub fn round_label(&self) -> String {
        if self.running {
            format!("Round {} / {}", self.current_round, self.config.rounds)
        } else {
            "Ready".to_string()
        }
    }

    /// Single status line for terminal output
    pub fn status_line(&self) -> String {
        let phase = if self.paused {
            format!("{} (paused)", self.phase)
        } else {
            self.phase.to_string()
        };
        format!(
            "{:<14} {:>6}  {:<15} {:>3}%",
            self.round_label(),
            self.countdown_label(),
            phase,
            (self.progress() * 100.0).round() as u32
        )
    }
}

/// Whole seconds left, rounded up
pub fn seconds_remaining(remaining_ms: f64) -> u64 {
    if remaining_ms <= 0.0 {
        0
    } else {
        (remaining_ms / 1000.0).ceil() as u64
    }
}
