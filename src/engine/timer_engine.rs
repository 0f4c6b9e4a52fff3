//! Phase/round state machine driven by host ticks

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::{cue_for_second, CueSink, GraceTimer};
use crate::state::{seconds_remaining, CueMemory, IntervalConfig, Phase, RunState, TimerSnapshot};

/// Interval timer engine.
///
/// The engine never reads a clock. The host reports elapsed time through
/// [`TimerEngine::tick`] and the engine converts it into countdown progress,
/// cues and phase transitions. Every mutation publishes a fresh
/// [`TimerSnapshot`] to subscribers.
#[derive(Debug)]
pub struct TimerEngine<S: CueSink> {
    config: IntervalConfig,
    state: RunState,
    cue_memory: CueMemory,
    /// Pending transition armed when the countdown hit zero
    grace: Option<GraceTimer>,
    cues: S,
    snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    _snapshot_rx: watch::Receiver<TimerSnapshot>,
}

impl<S: CueSink> TimerEngine<S> {
    /// Create an idle engine that plays cues through `cues`
    pub fn new(cues: S) -> Self {
        let config = IntervalConfig::default();
        let state = RunState::idle();
        let (snapshot_tx, snapshot_rx) = watch::channel(TimerSnapshot::new(&state, config));

        Self {
            config,
            state,
            cue_memory: CueMemory::default(),
            grace: None,
            cues,
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Start a run with `config`. Ignored while a run is in progress.
    pub fn start(&mut self, config: IntervalConfig) {
        if self.state.running {
            debug!("Start ignored, timer already running");
            return;
        }

        self.config = config;
        self.cues.prime();
        self.grace = None;
        self.cue_memory.clear();
        self.state.running = true;
        self.state.paused = false;
        self.state.enter(Phase::Work, 1, config.work_ms());

        info!(
            "Timer started: work={}s, rest={}s, rounds={}",
            config.work_seconds, config.rest_seconds, config.rounds
        );
        self.publish();
    }

    /// Advance the countdown by `elapsed_ms`.
    ///
    /// No-op while stopped or paused. Negative or non-finite elapsed time
    /// counts as zero.
    pub fn tick(&mut self, elapsed_ms: f64) {
        if !self.state.running || self.state.paused {
            return;
        }

        let elapsed = if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            elapsed_ms
        } else {
            0.0
        };

        if let Some(grace) = self.grace.as_mut() {
            // Still at zero; only the pending transition moves
            if grace.advance(elapsed) {
                self.fire_grace();
            }
            self.publish();
            return;
        }

        let overshoot = (elapsed - self.state.remaining_ms).max(0.0);
        self.state.remaining_ms = (self.state.remaining_ms - elapsed).max(0.0);
        self.emit_cue();

        if self.state.remaining_ms <= 0.0 {
            let mut grace = GraceTimer::arm(self.state.phase);
            debug!("{} phase reached zero, transition pending", self.state.phase);
            if grace.advance(overshoot) {
                self.finish_phase(grace.phase());
            } else {
                self.grace = Some(grace);
            }
        }

        self.publish();
    }

    pub fn pause(&mut self) {
        if !self.state.running || self.state.paused {
            return;
        }
        self.state.paused = true;
        info!("Timer paused at {:.0}ms remaining", self.state.remaining_ms);
        self.publish();
    }

    /// Resume a paused run. The host must resynchronize its clock so the
    /// paused interval is not reported to the next tick.
    pub fn resume(&mut self) {
        if !self.state.running || !self.state.paused {
            return;
        }
        self.state.paused = false;
        info!("Timer resumed");
        self.publish();
    }

    pub fn toggle_pause(&mut self) {
        if self.state.paused {
            self.resume();
        } else {
            self.pause();
        }
    }

    /// Return to Idle immediately, cancelling any pending transition
    pub fn stop(&mut self) {
        if self.grace.take().is_some() {
            debug!("Pending phase transition cancelled");
        }
        if self.state.running {
            info!("Timer stopped");
        }
        self.state = RunState::idle();
        self.cue_memory.clear();
        self.publish();
    }

    pub fn reset(&mut self) {
        self.stop();
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::new(&self.state, self.config)
    }

    /// Receiver that always holds the latest snapshot
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub fn state(&self) -> &RunState {
        &self.state
    }

    pub fn config(&self) -> &IntervalConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    pub fn transition_pending(&self) -> bool {
        self.grace.is_some()
    }

    pub fn cue_sink(&self) -> &S {
        &self.cues
    }

    pub fn cue_sink_mut(&mut self) -> &mut S {
        &mut self.cues
    }

    fn emit_cue(&mut self) {
        let seconds = seconds_remaining(self.state.remaining_ms);
        let Some(kind) = cue_for_second(seconds) else {
            return;
        };
        if self.cue_memory.mark(seconds) {
            debug!("Cue {:?} at {}s remaining", kind, seconds);
            self.cues.emit(kind, kind.frequency_hz());
        }
    }

    fn fire_grace(&mut self) {
        match self.grace.take() {
            Some(grace) => self.finish_phase(grace.phase()),
            None => warn!("Grace delay fired without a pending transition"),
        }
    }

    /// Move on from `finished`, the phase whose countdown reached zero
    fn finish_phase(&mut self, finished: Phase) {
        let round = self.state.current_round;
        let last_round = round >= self.config.rounds;

        let next = match finished {
            Phase::Work if self.config.rest_seconds > 0 => Some((Phase::Rest, round)),
            Phase::Work | Phase::Rest if last_round => None,
            Phase::Work | Phase::Rest => Some((Phase::Work, round + 1)),
            Phase::Idle => None,
        };

        self.cue_memory.clear();
        match next {
            Some((phase, round)) => {
                let duration = self.config.phase_duration_ms(phase);
                self.state.enter(phase, round, duration);
                info!("Round {}/{}: {} phase", round, self.config.rounds, phase);
            }
            None => {
                self.state = RunState::idle();
                info!("Interval run complete after {} rounds", self.config.rounds);
            }
        }
    }

    fn publish(&self) {
        if let Err(e) = self.snapshot_tx.send(self.snapshot()) {
            warn!("Failed to send timer snapshot: {}", e);
        }
    }
}
