//! Operator commands read from the terminal

use crate::error::{Error, Result};
use crate::state::ConfigField;

/// Actions an operator can take on the timer
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    /// Pause when running, resume when paused
    TogglePause,
    Stop,
    Reset,
    /// Edit a configuration field; the raw text is committed by the form
    Set(ConfigField, String),
    Volume(f32),
    Status,
    Help,
    Quit,
}

impl Command {
    /// Parse one line of operator input
    pub fn parse(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let Some(word) = parts.next() else {
            return Ok(Command::TogglePause);
        };
        let arg = parts.collect::<Vec<_>>().join(" ");

        let command = match word.to_lowercase().as_str() {
            "start" | "s" => Command::Start,
            "pause" | "p" => Command::Pause,
            "resume" | "r" => Command::Resume,
            "toggle" | "t" => Command::TogglePause,
            "stop" => Command::Stop,
            "reset" => Command::Reset,
            "work" => Command::Set(ConfigField::Work, arg),
            "rest" => Command::Set(ConfigField::Rest, arg),
            "rounds" => Command::Set(ConfigField::Rounds, arg),
            "volume" | "vol" => {
                let volume = arg.parse::<f32>().map_err(|_| Error::InvalidArgument {
                    command: "volume".to_string(),
                    value: arg.clone(),
                })?;
                Command::Volume(volume)
            }
            "status" => Command::Status,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(Error::UnknownCommand(other.to_string())),
        };

        Ok(command)
    }
}

/// Usage text shown for `help`
pub const HELP: &str = "\
Commands:
  start            start a run with the current settings
  pause | resume   pause or resume the countdown
  <enter>          toggle pause
  stop | reset     return to idle
  work N           work seconds (idle only)
  rest N           rest seconds (idle only)
  rounds N         number of rounds (idle only)
  volume X         cue volume between 0 and 1
  status           print the current state
  quit             exit";
