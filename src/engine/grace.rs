//! Deferred phase transition after the countdown reaches zero

use crate::state::Phase;

/// Delay between reaching zero and switching phase, so the end tone plays out
pub const GRACE_DELAY_MS: f64 = 100.0;

/// Handle for a pending phase transition.
///
/// The engine owns at most one of these. Dropping it cancels the transition.
#[derive(Debug, Clone, PartialEq)]
pub struct GraceTimer {
    phase: Phase,
    remaining_ms: f64,
}

impl GraceTimer {
    /// Arm a transition out of `phase`
    pub fn arm(phase: Phase) -> Self {
        Self {
            phase,
            remaining_ms: GRACE_DELAY_MS,
        }
    }

    /// Phase that reached zero
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_ms(&self) -> f64 {
        self.remaining_ms
    }

    /// Charge elapsed time against the delay. Returns true once it is due.
    pub fn advance(&mut self, elapsed_ms: f64) -> bool {
        self.remaining_ms = (self.remaining_ms - elapsed_ms).max(0.0);
        self.is_due()
    }

    pub fn is_due(&self) -> bool {
        self.remaining_ms <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grace_timer_fires_after_delay() {
        let mut grace = GraceTimer::arm(Phase::Work);
        assert!(!grace.advance(60.0));
        assert_eq!(grace.remaining_ms(), 40.0);
        assert!(grace.advance(60.0));
        assert_eq!(grace.phase(), Phase::Work);
    }

    #[test]
    fn test_grace_timer_zero_elapsed() {
        let mut grace = GraceTimer::arm(Phase::Rest);
        assert!(!grace.advance(0.0));
        assert!(!grace.is_due());
    }
}
