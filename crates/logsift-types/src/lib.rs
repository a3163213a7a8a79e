//! Shared types for logsift
//!
//! This crate contains data structures used by the log pipeline and the CLI.

use std::fmt;
use std::str::FromStr;

// ============================================================================
// Log Types
// ============================================================================

/// Log severity level
///
/// Only these three levels are accepted; anything else on an input line makes
/// the line invalid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Every accepted level, in severity order
    pub const ALL: [LogLevel; 3] = [Self::Info, Self::Warn, Self::Error];

    /// Parse a level case-insensitively
    ///
    /// Only exact names are recognised: `warning` or `err` are not levels.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "INFO" => Some(Self::Info),
            "WARN" => Some(Self::Warn),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }

    /// Canonical uppercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not one of the allowed levels
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid log level '{0}' (expected INFO, WARN or ERROR)")]
pub struct InvalidLevel(pub String);

impl FromStr for LogLevel {
    type Err = InvalidLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| InvalidLevel(s.to_string()))
    }
}

/// A single parsed log entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    /// Timestamp exactly as it appeared on the line
    pub timestamp: String,

    /// Validated severity
    pub level: LogLevel,

    /// Originating service, compared case-sensitively
    pub service: String,

    /// Free text message
    pub message: String,
}

impl LogEntry {
    pub fn new(timestamp: String, level: LogLevel, service: String, message: String) -> Self {
        Self {
            timestamp,
            level,
            service,
            message,
        }
    }

    /// Render the entry as an output line (without the trailing newline)
    pub fn format_line(&self) -> String {
        format!(
            "{} | {} | {} | {}",
            self.timestamp, self.level, self.service, self.message
        )
    }
}

// ============================================================================
// Filter Types
// ============================================================================

/// Optional level and service constraints for a run
///
/// An empty value is stored as `None`, so `--service ""` filters nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Uppercased level name. May name a level outside the allowed set, in
    /// which case nothing matches.
    pub level: Option<String>,

    /// Service name exactly as supplied
    pub service: Option<String>,
}

impl FilterCriteria {
    pub fn new(level: Option<&str>, service: Option<&str>) -> Self {
        Self {
            level: level
                .filter(|l| !l.is_empty())
                .map(|l| l.to_uppercase()),
            service: service.filter(|s| !s.is_empty()).map(str::to_string),
        }
    }

    /// Check if the criteria match everything
    pub fn is_empty(&self) -> bool {
        self.level.is_none() && self.service.is_none()
    }
}

// ============================================================================
// Skip Classification
// ============================================================================

/// Why an input line produced no entry
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// Nothing left after trimming
    Blank,

    /// The line did not split into exactly four segments
    SegmentCount { found: usize },

    /// Well-formed line whose level is outside the allowed set
    InvalidLevel { level: String },
}
