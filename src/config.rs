// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local setups.

use std::env;
use std::path::PathBuf;

/// Default number of weeks for the weekly table.
pub const DEFAULT_WEEKS: usize = 4;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the downloaded activity pages
    pub activities_dir: PathBuf,
    /// Weeks shown by `--weekly` when no count is given
    pub default_weeks: usize,
    /// Emit logs as JSON lines instead of human readable text
    pub log_json: bool,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            activities_dir: PathBuf::from("tests/fixtures"),
            default_weeks: DEFAULT_WEEKS,
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let activities_dir = match env::var("STRAVA_CLI_ACTIVITIES_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config/strava-cli/strava-cli-activities"))
                .map_err(|_| ConfigError::Missing("STRAVA_CLI_ACTIVITIES_DIR"))?,
        };

        Ok(Self {
            activities_dir,
            default_weeks: env::var("STRAVA_CLI_WEEKS")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_WEEKS),
            log_json: env::var("STRAVA_CLI_LOG_JSON")
                .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0} (or HOME)")]
    Missing(&'static str),
}
