//! Host tasks module
//!
//! The host side of the timer: the session wrapping the engine and the
//! loop that ticks it.

pub mod session;
pub mod timer_loop;

// Re-export main types
pub use session::{HostClock, TimerSession};
pub use timer_loop::{run_timer_loop, tick_period, RenderMode, Renderer};
