//! Configuration and CLI argument handling

use std::time::Duration;

use anyhow::{ensure, Result};
use clap::Parser;

use crate::state::CountdownConfig;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "lift-off")]
#[command(about = "A ten second launch countdown served over HTTP")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20610")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Countdown length in seconds
    #[arg(short, long, default_value = "10")]
    pub duration: u64,

    /// Interval between timer ticks in milliseconds (at most 1000)
    #[arg(long, default_value = "1")]
    pub tick_interval_ms: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Validated countdown settings
    pub fn countdown_config(&self) -> Result<CountdownConfig> {
        ensure!(self.duration > 0, "countdown duration must be at least one second");
        ensure!(self.tick_interval_ms > 0, "tick interval must be at least one millisecond");

        Ok(CountdownConfig::new(
            Duration::from_secs(self.duration),
            Duration::from_millis(self.tick_interval_ms),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("lift-off").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_match_the_launch_screen() {
        let config = parse(&[]);
        assert_eq!(config.address(), "127.0.0.1:20610");
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.countdown_config().unwrap(), CountdownConfig::default());
    }

    #[test]
    fn overrides() {
        let config = parse(&["-p", "8080", "-d", "3", "--tick-interval-ms", "50", "-v"]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level(), "debug");

        let countdown = config.countdown_config().unwrap();
        assert_eq!(countdown.total_seconds(), 3);
        assert_eq!(countdown.tick_interval(), Duration::from_millis(50));
    }

    #[test]
    fn zero_values_are_rejected() {
        assert!(parse(&["-d", "0"]).countdown_config().is_err());
        assert!(parse(&["--tick-interval-ms", "0"]).countdown_config().is_err());
    }
}
