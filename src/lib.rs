//! Lift Off - a ten second launch countdown
//!
//! This library provides the countdown controller (start command, tick-driven
//! state machine, observer channel) and an HTTP surface that exposes it.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, CountdownConfig, CountdownController, CountdownState, Phase};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
