//! Host-side session: the engine, its configuration form and the tick clock

use std::ops::ControlFlow;

use tokio::time::Instant;
use tracing::{info, warn};

use crate::{
    commands::{Command, HELP},
    engine::{CueSink, TimerEngine},
    state::{ConfigForm, IntervalConfig},
};

/// Converts wall-clock instants into elapsed milliseconds between ticks
#[derive(Debug, Clone, Copy)]
pub struct HostClock {
    last: Instant,
}

impl HostClock {
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    /// Milliseconds since the previous reading
    pub fn elapsed_ms(&mut self, now: Instant) -> f64 {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        elapsed.as_micros() as f64 / 1000.0
    }

    /// Forget the time since the previous reading
    pub fn resync(&mut self, now: Instant) {
        self.last = now;
    }
}

/// Everything the host owns around one engine
#[derive(Debug)]
pub struct TimerSession<S: CueSink> {
    pub engine: TimerEngine<S>,
    pub form: ConfigForm,
    clock: HostClock,
}

impl<S: CueSink> TimerSession<S> {
    pub fn new(engine: TimerEngine<S>, config: &IntervalConfig, now: Instant) -> Self {
        Self {
            engine,
            form: ConfigForm::from_config(config),
            clock: HostClock::new(now),
        }
    }

    /// Report the time since the previous tick to the engine.
    ///
    /// The clock advances even while paused, so a pause is never charged.
    pub fn on_tick(&mut self, now: Instant) {
        let elapsed = self.clock.elapsed_ms(now);
        self.engine.tick(elapsed);
    }

    /// Charge the time up to `now`, then pause
    fn pause(&mut self, now: Instant) {
        if self.engine.is_running() && !self.engine.is_paused() {
            self.on_tick(now);
        }
        self.engine.pause();
    }

    fn resume(&mut self, now: Instant) {
        self.clock.resync(now);
        self.engine.resume();
    }

    /// Apply an operator command
    pub fn apply(&mut self, command: Command, now: Instant) -> ControlFlow<()> {
        match command {
            Command::Start => {
                if self.engine.is_running() {
                    info!("Timer already running");
                } else {
                    let config = self.form.commit();
                    self.clock.resync(now);
                    self.engine.start(config);
                }
            }
            Command::Pause => self.pause(now),
            Command::Resume => self.resume(now),
            Command::TogglePause => {
                if self.engine.is_paused() {
                    self.resume(now);
                } else {
                    self.pause(now);
                }
            }
            Command::Stop => self.engine.stop(),
            Command::Reset => self.engine.reset(),
            Command::Set(field, raw) => {
                if self.engine.is_running() {
                    warn!("Stop the timer before changing {}", field.name());
                } else {
                    self.form.set_field(field, raw);
                    let config = self.form.commit();
                    info!(
                        "Settings: work={}s, rest={}s, rounds={}",
                        config.work_seconds, config.rest_seconds, config.rounds
                    );
                }
            }
            Command::Volume(volume) => self.engine.cue_sink_mut().set_volume(volume),
            Command::Status => info!("{}", self.engine.snapshot().status_line()),
            Command::Help => println!("{HELP}"),
            Command::Quit => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }
}
