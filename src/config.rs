//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::{ConfigField, ConfigForm, IntervalConfig};
use crate::tasks::RenderMode;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "interval-timer")]
#[command(about = "A work/rest/round interval countdown timer with audible cues")]
#[command(version)]
pub struct Config {
    /// Work phase length in seconds
    #[arg(short, long, default_value = "20")]
    pub work: String,

    /// Rest phase length in seconds
    #[arg(short, long, default_value = "10")]
    pub rest: String,

    /// Number of rounds
    #[arg(short = 'n', long, default_value = "8")]
    pub rounds: String,

    /// Cue volume between 0 and 1
    #[arg(long, default_value = "0.8")]
    pub volume: f32,

    /// Tick cadence in milliseconds (10 to 1000)
    #[arg(long, default_value = "200")]
    pub tick_ms: u64,

    /// Start the first round immediately
    #[arg(short, long)]
    pub autostart: bool,

    /// Print snapshots as JSON lines
    #[arg(long)]
    pub json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Commit the interval fields the same way the operator's edits are committed
    pub fn interval(&self) -> IntervalConfig {
        let mut form = ConfigForm::default();
        form.set_field(ConfigField::Work, self.work.as_str());
        form.set_field(ConfigField::Rest, self.rest.as_str());
        form.set_field(ConfigField::Rounds, self.rounds.as_str());
        form.commit()
    }

    pub fn render_mode(&self) -> RenderMode {
        if self.json {
            RenderMode::Json
        } else {
            RenderMode::Text
        }
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
