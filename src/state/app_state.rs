//! Server-wide state shared by the HTTP handlers

use std::{
    sync::{Mutex, PoisonError},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tracing::info;

use super::{CountdownController, CountdownState, RunId};

/// Main application state: the countdown plus server metadata
#[derive(Debug)]
pub struct AppState {
    pub controller: CountdownController,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// When the current run was requested
    last_start: Mutex<Option<DateTime<Utc>>>,
}

impl AppState {
    pub fn new(controller: CountdownController, port: u16, host: String) -> Self {
        Self {
            controller,
            start_time: Instant::now(),
            port,
            host,
            last_start: Mutex::new(None),
        }
    }

    /// Start (or restart) the countdown and record when it was requested
    pub fn start_countdown(&self) -> (RunId, CountdownState) {
        let run = self.controller.start();
        *self.last_start.lock().unwrap_or_else(PoisonError::into_inner) = Some(Utc::now());
        info!("Launch sequence requested, run {}", run);
        (run, self.controller.snapshot())
    }

    pub fn last_start(&self) -> Option<DateTime<Utc>> {
        *self.last_start.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }
}
