//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{CountdownDisplay, CountdownState, Phase};

/// API response structure for the start command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: Phase,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub countdown: CountdownState,
}

impl ApiResponse {
    pub fn new(message: String, countdown: CountdownState) -> Self {
        Self {
            status: countdown.phase(),
            message,
            timestamp: Utc::now(),
            countdown,
        }
    }
}

/// Full status of the countdown, including what the screen would show
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub countdown: CountdownState,
    pub phase: Phase,
    pub display: CountdownDisplay,
    pub duration_seconds: u64,
    pub last_start: Option<DateTime<Utc>>,
    pub uptime: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
