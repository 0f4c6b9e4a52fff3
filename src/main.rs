//! Interval Timer - a work/rest/round countdown with audible phase cues
//!
//! This is the main entry point for the interval-timer application.

use tokio::time::Instant;
use tracing::info;

use interval_timer::{
    audio::ToneEmitter,
    commands::Command,
    config::Config,
    engine::TimerEngine,
    tasks::{run_timer_loop, tick_period, TimerSession},
    utils::shutdown_signal,
};

// The audio stream is not Send, so everything stays on one thread
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Logs go to stderr; stdout carries the countdown
    tracing_subscriber::fmt()
        .with_env_filter(format!("interval_timer={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    let interval = config.interval();
    info!("Starting interval-timer v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: work={}s, rest={}s, rounds={}, tick={}ms",
        interval.work_seconds, interval.rest_seconds, interval.rounds, config.tick_ms
    );

    let engine = TimerEngine::new(ToneEmitter::new(config.volume));
    let mut session = TimerSession::new(engine, &interval, Instant::now());

    if config.autostart {
        let _ = session.apply(Command::Start, Instant::now());
    } else {
        info!("Type `start` to begin, `help` for commands");
    }

    run_timer_loop(
        session,
        tick_period(config.tick_ms),
        config.render_mode(),
        shutdown_signal(),
    )
    .await?;

    info!("Shutdown complete");
    Ok(())
}
