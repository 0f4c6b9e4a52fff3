//! Run state of the countdown and its cue memory

use serde::{Deserialize, Serialize};

/// Activity segment of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[default]
    Idle,
    Work,
    Rest,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Work => "work",
            Phase::Rest => "rest",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable state of a run. Only the engine writes to it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RunState {
    pub phase: Phase,
    pub running: bool,
    pub paused: bool,
    pub current_round: u32,
    pub remaining_ms: f64,
}

impl RunState {
    /// The stopped state: Idle, round 0, nothing remaining
    pub fn idle() -> Self {
        Self::default()
    }

    /// Enter a phase with its full duration
    pub fn enter(&mut self, phase: Phase, round: u32, duration_ms: f64) {
        self.phase = phase;
        self.current_round = round;
        self.remaining_ms = duration_ms;
    }

    pub fn is_idle(&self) -> bool {
        !self.running && self.phase == Phase::Idle
    }
}

/// Whole second at which a cue was last emitted in the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CueMemory(Option<u64>);

impl CueMemory {
    pub fn clear(&mut self) {
        self.0 = None;
    }

    /// Record `second` and report whether it had not been cued yet
    pub fn mark(&mut self, second: u64) -> bool {
        if self.0 == Some(second) {
            return false;
        }
        self.0 = Some(second);
        true
    }

    pub fn last(&self) -> Option<u64> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_invariant() {
        let state = RunState::idle();
        assert!(state.is_idle());
        assert_eq!(state.current_round, 0);
        assert_eq!(state.remaining_ms, 0.0);
    }

    #[test]
    fn test_cue_memory_marks_once() {
        let mut memory = CueMemory::default();
        assert!(memory.mark(3));
        assert!(!memory.mark(3));
        assert!(memory.mark(2));
        memory.clear();
        assert_eq!(memory.last(), None);
        assert!(memory.mark(2));
    }

    #[test]
    fn test_phase_serializes_lowercase() {
        let json = serde_json::to_string(&Phase::Rest).unwrap();
        assert_eq!(json, "\"rest\"");
    }
}
