//! What the launch screen shows for a given countdown state

use serde::{Deserialize, Serialize};

use super::CountdownState;

pub const LIFT_OFF_TEXT: &str = "Lift off!";
pub const ROCKET: &str = "🚀";
pub const START_BUTTON_LABEL: &str = "Start launch sequence";

/// Presentation-ready projection of a [`CountdownState`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownDisplay {
    pub title: String,
    pub text: String,
    pub show_rocket: bool,
    pub show_start_button: bool,
    pub start_button_label: String,
}

impl CountdownDisplay {
    pub fn new(state: &CountdownState, total_seconds: u64) -> Self {
        let text = if state.is_finished {
            LIFT_OFF_TEXT.to_string()
        } else {
            state.seconds_remaining.to_string()
        };

        Self {
            title: format!("{} Second Countdown", total_seconds),
            text,
            show_rocket: state.is_finished,
            show_start_button: !state.is_running,
            start_button_label: START_BUTTON_LABEL.to_string(),
        }
    }

    /// One-line rendering for log output
    pub fn headline(&self) -> String {
        if self.show_rocket {
            format!("{} {}", ROCKET, self.text)
        } else {
            self.text.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_shows_number_and_button() {
        let display = CountdownDisplay::new(&CountdownState::idle(10), 10);
        assert_eq!(display.title, "10 Second Countdown");
        assert_eq!(display.text, "10");
        assert!(!display.show_rocket);
        assert!(display.show_start_button);
    }

    #[test]
    fn running_hides_button() {
        let mut state = CountdownState::running(10);
        state.seconds_remaining = 3;
        let display = CountdownDisplay::new(&state, 10);
        assert_eq!(display.text, "3");
        assert!(!display.show_start_button);
        assert_eq!(display.headline(), "3");
    }

    #[test]
    fn finished_lifts_off() {
        let display = CountdownDisplay::new(&CountdownState::finished(), 10);
        assert_eq!(display.text, LIFT_OFF_TEXT);
        assert!(display.show_rocket);
        assert!(display.show_start_button);
        assert_eq!(display.headline(), "🚀 Lift off!");
    }
}
