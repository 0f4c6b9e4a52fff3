//! Interval configuration and the input form that produces it

use serde::{Deserialize, Serialize};

use super::Phase;

/// Work/rest/round configuration, captured when a run starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalConfig {
    pub work_seconds: u32,
    pub rest_seconds: u32,
    pub rounds: u32,
}

impl IntervalConfig {
    /// Create a configuration from already-validated values
    pub fn new(work_seconds: u32, rest_seconds: u32, rounds: u32) -> Self {
        Self {
            work_seconds,
            rest_seconds,
            rounds,
        }
    }

    pub fn work_ms(&self) -> f64 {
        f64::from(self.work_seconds) * 1000.0
    }

    pub fn rest_ms(&self) -> f64 {
        f64::from(self.rest_seconds) * 1000.0
    }

    /// Full length of a phase in milliseconds (zero for Idle)
    pub fn phase_duration_ms(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Idle => 0.0,
            Phase::Work => self.work_ms(),
            Phase::Rest => self.rest_ms(),
        }
    }
}

impl Default for IntervalConfig {
    fn default() -> Self {
        Self::new(20, 10, 8)
    }
}

/// One of the three editable configuration fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigField {
    Work,
    Rest,
    Rounds,
}

impl ConfigField {
    pub fn name(&self) -> &'static str {
        match self {
            ConfigField::Work => "work",
            ConfigField::Rest => "rest",
            ConfigField::Rounds => "rounds",
        }
    }
}

/// Raw text of the configuration inputs, as typed by the operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigForm {
    work: String,
    rest: String,
    rounds: String,
}

impl ConfigForm {
    /// Create a form pre-filled from a configuration
    pub fn from_config(config: &IntervalConfig) -> Self {
        Self {
            work: config.work_seconds.to_string(),
            rest: config.rest_seconds.to_string(),
            rounds: config.rounds.to_string(),
        }
    }

    /// Replace the raw text of a field. Nothing is validated until commit.
    pub fn set_field(&mut self, field: ConfigField, raw: impl Into<String>) {
        let raw = raw.into();
        match field {
            ConfigField::Work => self.work = raw,
            ConfigField::Rest => self.rest = raw,
            ConfigField::Rounds => self.rounds = raw,
        }
    }

    pub fn field(&self, field: ConfigField) -> &str {
        match field {
            ConfigField::Work => &self.work,
            ConfigField::Rest => &self.rest,
            ConfigField::Rounds => &self.rounds,
        }
    }

    /// Apply the commit rule to every field and rewrite the fields with the
    /// committed values.
    pub fn commit(&mut self) -> IntervalConfig {
        let config = IntervalConfig::new(
            commit_field(&self.work),
            commit_field(&self.rest),
            commit_field(&self.rounds),
        );
        *self = Self::from_config(&config);
        config
    }
}

impl Default for ConfigForm {
    fn default() -> Self {
        Self::from_config(&IntervalConfig::default())
    }
}

/// Commit a single raw field value.
///
/// Empty, non-numeric or sub-1 input falls back to 1. This applies to the
/// rest field as well, so a committed rest of 0 becomes 1.
pub fn commit_field(raw: &str) -> u32 {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 1.0 => {
            if value >= f64::from(u32::MAX) {
                u32::MAX
            } else {
                value.trunc() as u32
            }
        }
        _ => 1,
    }
}
