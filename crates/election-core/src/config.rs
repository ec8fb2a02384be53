//! Election configuration loaded via OrthoConfig.
//!
//! Values are layered from command-line arguments, `ELECTION_*` environment
//! variables and an optional configuration file. Missing values fall back to
//! the defaults below.

use std::fmt;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{ElectionName, SeatBudget};
use crate::error::ElectionError;

/// Election name used when none is configured.
pub const DEFAULT_ELECTION_NAME: &str = "General Election 2025";
/// Seat budget used when none is configured.
pub const DEFAULT_SEAT_BUDGET: i64 = 100;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per event.
    #[default]
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

/// Returned when a log format name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log format '{0}' (expected 'json' or 'pretty')")]
pub struct LogFormatParseError(String);

impl FromStr for LogFormat {
    type Err = LogFormatParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            _ => Err(LogFormatParseError(value.to_owned())),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Json => "json",
            Self::Pretty => "pretty",
        })
    }
}

/// Configuration values for a new election.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "ELECTION")]
pub struct ElectionSettings {
    /// Display name of the election.
    pub name: Option<String>,
    /// Number of seats distributed by the allocator.
    #[ortho_config(default = 100)]
    pub seat_budget: i64,
    /// Log output format: `json` or `pretty`.
    pub log_format: Option<String>,
}

impl ElectionSettings {
    /// Validated election name, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`ElectionError::InvalidElectionName`] when the configured
    /// name is blank.
    pub fn election_name(&self) -> Result<ElectionName, ElectionError> {
        ElectionName::new(self.name.as_deref().unwrap_or(DEFAULT_ELECTION_NAME))
    }

    /// Validated seat budget.
    ///
    /// # Errors
    ///
    /// Returns [`ElectionError::InvalidSeatBudget`] when the configured
    /// budget is not positive.
    pub fn seat_budget(&self) -> Result<SeatBudget, ElectionError> {
        SeatBudget::new(self.seat_budget)
    }

    /// Parsed log format, falling back to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`LogFormatParseError`] for unrecognised names.
    pub fn log_format(&self) -> Result<LogFormat, LogFormatParseError> {
        self.log_format
            .as_deref()
            .map_or(Ok(LogFormat::default()), LogFormat::from_str)
    }
}
