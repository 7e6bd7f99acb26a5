//! Simulated sensor source
//!
//! [`SensorSimulator`] stands in for the acquisition hardware: it
//! produces uniformly distributed temperature/pressure samples at a
//! configurable rate. The consuming side (recorder, demo driver) polls
//! [`sample`](SensorSimulator::sample) once per
//! [`sample_interval`](SensorSimulator::sample_interval) while running.

use std::time::Duration;

use chrono::Local;
use rand::Rng;

use crate::codec;

/// Fallback sampling rate when a non-positive rate is requested
pub const DEFAULT_SAMPLING_RATE_HZ: f64 = 1.0;

const TEMPERATURE_RANGE: std::ops::Range<f64> = 15.0..35.0; // °C
const PRESSURE_RANGE: std::ops::Range<f64> = 990.0..1030.0; // hPa

/// One sample as delivered by the acquisition side.
///
/// The timestamp is pre-rendered text, exactly as a real sensor feed
/// would hand it over.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSample {
    pub temperature: f64,
    pub pressure: f64,
    pub timestamp: String,
}

/// Rate-controlled random sample generator
#[derive(Debug)]
pub struct SensorSimulator {
    sampling_rate_hz: f64,
    running: bool,
}

impl Default for SensorSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorSimulator {
    /// Create a simulator at the default rate, stopped
    pub fn new() -> Self {
        Self {
            sampling_rate_hz: DEFAULT_SAMPLING_RATE_HZ,
            running: false,
        }
    }

    /// Set the sampling rate in Hz.
    ///
    /// A non-positive rate falls back to
    /// [`DEFAULT_SAMPLING_RATE_HZ`].
    pub fn set_sampling_rate(&mut self, rate: f64) {
        self.sampling_rate_hz = if rate <= 0.0 { DEFAULT_SAMPLING_RATE_HZ } else { rate };
    }

    /// Current sampling rate in Hz
    pub fn sampling_rate(&self) -> f64 {
        self.sampling_rate_hz
    }

    /// Interval between samples at the current rate
    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis((1000.0 / self.sampling_rate_hz) as u64)
    }

    /// True between `start` and `stop`
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin sampling.
    ///
    /// Returns the first sample immediately so consumers need not wait
    /// a full interval for data. Already running: no new sample.
    pub fn start(&mut self) -> Option<SensorSample> {
        if self.running {
            return None;
        }

        self.running = true;
        tracing::info!(
            "Starting sensor sampling at {} Hz (interval: {:?})",
            self.sampling_rate_hz,
            self.sample_interval()
        );
        Some(self.sample())
    }

    /// Stop sampling. Safe to call repeatedly.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Produce one sample stamped with the current local time
    pub fn sample(&mut self) -> SensorSample {
        let mut rng = rand::thread_rng();
        SensorSample {
            temperature: rng.gen_range(TEMPERATURE_RANGE),
            pressure: rng.gen_range(PRESSURE_RANGE),
            timestamp: codec::format_timestamp(Local::now().naive_local()),
        }
    }
}
