//! Process-level helpers
//!
//! Signal handling for the host loop.

pub mod signals;

pub use signals::shutdown_signal;
