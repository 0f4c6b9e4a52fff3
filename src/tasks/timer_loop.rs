//! Host loop: periodic ticks, operator input and rendering

use std::{future::Future, io::BufRead, ops::ControlFlow, thread, time::Duration};

use tokio::{
    sync::{mpsc, watch},
    time::{interval, Instant, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use super::TimerSession;
use crate::{
    commands::Command,
    engine::CueSink,
    error::Result,
    state::{Phase, TimerSnapshot},
};

/// Shortest and longest supported tick cadence. Anything slower than a
/// second could skip a cue second.
pub const MIN_TICK_MS: u64 = 10;
pub const MAX_TICK_MS: u64 = 1000;

/// Output format for snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Text,
    Json,
}

/// Prints a snapshot whenever its visible content changes
#[derive(Debug)]
pub struct Renderer {
    mode: RenderMode,
    last: Option<(Phase, bool, u32, String)>,
}

impl Renderer {
    pub fn new(mode: RenderMode) -> Self {
        Self { mode, last: None }
    }

    /// Render `snapshot` if it differs from the last one shown
    pub fn render(&mut self, snapshot: &TimerSnapshot) -> Result<Option<String>> {
        let key = (
            snapshot.phase,
            snapshot.paused,
            snapshot.current_round,
            snapshot.countdown_label(),
        );
        if self.last.as_ref() == Some(&key) {
            return Ok(None);
        }
        self.last = Some(key);

        let line = match self.mode {
            RenderMode::Text => snapshot.status_line(),
            RenderMode::Json => serde_json::to_string(snapshot)?,
        };
        Ok(Some(line))
    }
}

/// Clamp a requested tick cadence to the supported range
pub fn tick_period(tick_ms: u64) -> Duration {
    Duration::from_millis(tick_ms.clamp(MIN_TICK_MS, MAX_TICK_MS))
}

/// Read operator lines on a dedicated thread.
///
/// A blocking stdin read cannot be cancelled, so it stays off the runtime.
/// The receiver yields `None` once stdin reaches EOF.
pub fn spawn_input_reader() -> Result<mpsc::UnboundedReceiver<String>> {
    let (tx, rx) = mpsc::unbounded_channel();

    thread::Builder::new()
        .name("operator-input".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to read operator input: {}", e);
                        break;
                    }
                }
            }
        })?;

    Ok(rx)
}

/// Drive `session` until the operator quits, stdin closes with no run in
/// progress, or `shutdown` resolves.
pub async fn run_timer_loop<S, F>(
    mut session: TimerSession<S>,
    period: Duration,
    mode: RenderMode,
    shutdown: F,
) -> Result<()>
where
    S: CueSink,
    F: Future<Output = ()>,
{
    info!("Starting timer loop, tick every {}ms", period.as_millis());

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut snapshots: watch::Receiver<TimerSnapshot> = session.engine.subscribe();
    let mut renderer = Renderer::new(mode);
    let mut input = spawn_input_reader()?;
    let mut stdin_open = true;

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                session.on_tick(Instant::now());

                if !stdin_open && !session.engine.is_running() {
                    debug!("Input closed and timer idle");
                    break;
                }
            }

            line = input.recv(), if stdin_open => {
                match line {
                    Some(line) => match Command::parse(&line) {
                        Ok(command) => {
                            if let ControlFlow::Break(()) = session.apply(command, Instant::now()) {
                                info!("Quit requested");
                                break;
                            }
                        }
                        Err(e) => warn!("{} (type `help` for commands)", e),
                    },
                    None => {
                        debug!("Operator input closed");
                        stdin_open = false;
                    }
                }
            }

            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }

        if snapshots.has_changed().unwrap_or(false) {
            let snapshot = snapshots.borrow_and_update().clone();
            if let Some(line) = renderer.render(&snapshot)? {
                println!("{line}");
            }
        }
    }

    session.engine.stop();
    info!("Timer loop finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{IntervalConfig, RunState};

    fn snapshot(remaining_ms: f64) -> TimerSnapshot {
        let state = RunState {
            phase: Phase::Work,
            running: true,
            paused: false,
            current_round: 1,
            remaining_ms,
        };
        TimerSnapshot::new(&state, IntervalConfig::new(10, 5, 3))
    }

    #[test]
    fn test_renderer_skips_unchanged_label() {
        let mut renderer = Renderer::new(RenderMode::Text);
        assert!(renderer.render(&snapshot(9_800.0)).unwrap().is_some());
        assert!(renderer.render(&snapshot(9_600.0)).unwrap().is_none());
        assert!(renderer.render(&snapshot(8_900.0)).unwrap().is_some());
    }

    #[test]
    fn test_renderer_json_line() {
        let mut renderer = Renderer::new(RenderMode::Json);
        let line = renderer.render(&snapshot(9_800.0)).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["phase"], "work");
        assert_eq!(value["current_round"], 1);
        assert_eq!(value["config"]["rounds"], 3);
    }

    #[test]
    fn test_tick_period_is_clamped() {
        assert_eq!(tick_period(200), Duration::from_millis(200));
        assert_eq!(tick_period(0), Duration::from_millis(MIN_TICK_MS));
        assert_eq!(tick_period(5_000), Duration::from_millis(MAX_TICK_MS));
    }
}
