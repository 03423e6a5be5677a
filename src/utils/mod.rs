//! Utility functions module
//!
//! Process-level helpers for the server binary.

pub mod signals;

pub use signals::shutdown_signal;
