//! State management module
//!
//! This module contains the countdown state, its controller and the display
//! projection consumed by the HTTP layer.

pub mod countdown_state;
pub mod controller;
pub mod display;
pub mod app_state;

// Re-export main types
pub use app_state::AppState;
pub use countdown_state::{seconds_remaining, CountdownState, Phase};
pub use controller::{CountdownConfig, CountdownController, RunId};
pub use display::CountdownDisplay;
