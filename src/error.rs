//! Error handling for sensorlog-rs
//!
//! This module defines the error types used throughout the crate and a
//! Result alias. Errors fall into two classes:
//!
//! - [`ParseError`] - per-line decode failures. These are recoverable:
//!   a loader skips the offending line, tallies it, and keeps going.
//! - [`SensorLogError`] - everything else. These abort the operation
//!   that produced them (a load, a start-logging call) but never the
//!   process.

use std::path::PathBuf;
use thiserror::Error;

/// A single log line that could not be decoded.
///
/// Carries the offending field text so diagnostics can point at the
/// exact value that failed to parse.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Fewer than the three required fields
    #[error("Malformed line: found {0} fields, expected at least 3")]
    MalformedLine(usize),

    /// First field did not parse as a timestamp
    #[error("Invalid timestamp: {0:?}")]
    InvalidTimestamp(String),

    /// Second field did not parse as a float
    #[error("Invalid temperature: {0:?}")]
    InvalidTemperature(String),

    /// Third field did not parse as a float
    #[error("Invalid pressure: {0:?}")]
    InvalidPressure(String),
}

/// Main error type for sensorlog-rs operations
#[derive(Error, Debug)]
pub enum SensorLogError {
    /// Header line is missing one of the required column tokens
    #[error("Invalid file format: expected a header with Timestamp, Temperature and Pressure columns")]
    InvalidFormat,

    /// Every data line failed to decode
    #[error("No valid data found in log")]
    NoValidData,

    /// Log file does not exist
    #[error("File does not exist: {}", .0.display())]
    NotFound(PathBuf),

    /// Log file exists but could not be read
    #[error("File is not readable: {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Log file exists but has no content
    #[error("File is empty: {}", .0.display())]
    Empty(PathBuf),

    /// Data directory could not be created or is not writable
    #[error("Data directory unavailable: {}: {reason}", .path.display())]
    DirectoryUnavailable { path: PathBuf, reason: String },

    /// Log file could not be created
    #[error("Cannot create log file: {}: {source}", .path.display())]
    FileCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Write/flush failure during active logging
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for sensorlog-rs operations
pub type Result<T> = std::result::Result<T, SensorLogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::InvalidTemperature("abc".to_string());
        assert_eq!(err.to_string(), "Invalid temperature: \"abc\"");

        let err = ParseError::MalformedLine(2);
        assert!(err.to_string().contains("2 fields"));
    }

    #[test]
    fn test_error_display() {
        let err = SensorLogError::NotFound(PathBuf::from("/tmp/missing.csv"));
        assert!(err.to_string().contains("/tmp/missing.csv"));

        let err = SensorLogError::NoValidData;
        assert_eq!(err.to_string(), "No valid data found in log");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let err: SensorLogError = io.into();
        assert!(matches!(err, SensorLogError::Io(_)));
        assert!(err.to_string().contains("disk full"));
    }
}
