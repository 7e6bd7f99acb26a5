//! Core data types for sensorlog-rs
//!
//! This module contains the fundamental data structures used throughout
//! the crate for representing sensor samples and their summary
//! statistics.
//!
//! # Main Types
//!
//! - [`Reading`] - A single timestamped (temperature, pressure) sample
//!   with an optional reference to a captured camera frame
//! - [`ChannelStats`] - Min/max/mean/median for one measurement channel
//! - [`Summary`] - Whole-log statistics over both channels plus the
//!   covered time span
//!
//! # Timestamps
//!
//! Timestamps are [`chrono::NaiveDateTime`]: an offset-free local
//! date-time. The on-disk representation (see [`crate::codec`]) has
//! second precision; readings constructed from live acquisition are
//! truncated accordingly before they are written.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single sensor sample.
///
/// Immutable once constructed. Readings have no identity beyond their
/// timestamp; several readings may legally share one.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// When the sample was taken
    pub timestamp: NaiveDateTime,
    /// Temperature in degrees Celsius
    pub temperature: f64,
    /// Barometric pressure in hectopascal
    pub pressure: f64,
    /// File name of the camera frame associated with this sample, if any
    pub frame_ref: Option<String>,
}

impl Reading {
    /// Create a new reading without an associated frame
    pub fn new(timestamp: NaiveDateTime, temperature: f64, pressure: f64) -> Self {
        Self {
            timestamp,
            temperature,
            pressure,
            frame_ref: None,
        }
    }

    /// Attach a frame reference
    pub fn with_frame_ref(mut self, frame_ref: impl Into<String>) -> Self {
        self.frame_ref = Some(frame_ref.into());
        self
    }
}

/// Summary statistics for one measurement channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub min: f64,
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Middle of the value-sorted samples; for an even count, the mean
    /// of the two central values
    pub median: f64,
}

impl ChannelStats {
    /// Compute stats over a slice of samples.
    ///
    /// Returns `None` for an empty slice. The input is copied and
    /// value-sorted internally; the caller's ordering is untouched.
    pub fn from_samples(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;

        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        Some(Self {
            min,
            max,
            mean,
            median,
        })
    }
}

/// Summary statistics over a whole reading store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub temperature: ChannelStats,
    pub pressure: ChannelStats,
    /// Timestamp of the first reading in store order
    pub start_time: NaiveDateTime,
    /// Timestamp of the last reading in store order
    pub end_time: NaiveDateTime,
    /// `end_time - start_time` truncated to whole seconds. Store order
    /// is not necessarily chronological, so this may be negative.
    pub duration_seconds: i64,
    /// Number of readings covered
    pub count: usize,
}
