//! Background tasks module
//!
//! This module contains the timer task that drives a countdown run.

pub mod countdown_timer;

// Re-export main functions
pub use countdown_timer::countdown_timer_task;
