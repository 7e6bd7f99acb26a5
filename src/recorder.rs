//! Sensor log recorder
//!
//! [`SensorRecorder`] owns one open log file at a time and appends
//! readings to it as they arrive from the acquisition side. Each
//! appended line is flushed immediately: at one sample per second,
//! durability wins over throughput.
//!
//! # Frame references
//!
//! The camera side reports saved frames independently of the sensor
//! side. The recorder keeps the most recent frame file name as sticky
//! state: it is attached to every subsequent reading until a newer
//! frame replaces it, not consumed by the first append.
//!
//! # Lifecycle
//!
//! `Idle -> Logging -> Idle`. [`start`](SensorRecorder::start) while
//! logging returns the current file without creating a new one;
//! [`stop`](SensorRecorder::stop) from idle is a no-op. Dropping the
//! recorder stops the session.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime, Timelike};

use crate::codec;
use crate::error::{Result, SensorLogError};
use crate::store::ReadingStore;
use crate::types::Reading;

/// Prefix for generated log file names
const LOG_FILE_PREFIX: &str = "sensor_log_";

/// File-name timestamp format, second granularity
const LOG_FILE_STAMP: &str = "%Y%m%d_%H%M%S";

/// Upper bound on same-second create attempts before giving up
const MAX_CREATE_ATTEMPTS: u32 = 100;

/// State of the recorder lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecorderState {
    /// No open log file
    #[default]
    Idle,
    /// A log file is open and accepting readings
    Logging,
}

/// Appends timestamped sensor readings to a CSV log file
#[derive(Debug)]
pub struct SensorRecorder {
    data_dir: PathBuf,
    state: RecorderState,
    file: Option<File>,
    current_file: Option<PathBuf>,
    last_frame_ref: Option<String>,
    readings: ReadingStore,
}

impl SensorRecorder {
    /// Create a recorder writing into `data_dir`.
    ///
    /// The directory is not touched until [`start`](Self::start).
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            state: RecorderState::Idle,
            file: None,
            current_file: None,
            last_frame_ref: None,
            readings: ReadingStore::new(),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> RecorderState {
        self.state
    }

    /// True while a log file is open
    pub fn is_logging(&self) -> bool {
        self.state == RecorderState::Logging
    }

    /// Path of the most recently created log file, if any
    pub fn current_log_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    /// The configured data directory
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// In-memory mirror of the readings appended this session
    pub fn readings(&self) -> &ReadingStore {
        &self.readings
    }

    /// The sticky frame reference that will be attached to the next reading
    pub fn last_frame_ref(&self) -> Option<&str> {
        self.last_frame_ref.as_deref()
    }

    /// Open a new log file and begin logging.
    ///
    /// Idempotent while logging: returns the already-open file's path.
    /// Two starts within the same second get distinct files via a
    /// numeric suffix.
    pub fn start(&mut self) -> Result<PathBuf> {
        if self.state == RecorderState::Logging {
            if let Some(path) = &self.current_file {
                return Ok(path.clone());
            }
        }

        self.ensure_data_dir()?;

        let (mut file, path) = self.create_log_file()?;
        file.write_all(codec::encode_header().as_bytes())?;
        file.flush()?;

        self.file = Some(file);
        self.current_file = Some(path.clone());
        self.readings = ReadingStore::new();
        self.state = RecorderState::Logging;

        tracing::info!("Started logging to {}", path.display());
        Ok(path)
    }

    /// Close the log file and return to idle. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if self.state == RecorderState::Idle {
            return;
        }

        // Dropping the handle closes the file
        self.file = None;
        self.state = RecorderState::Idle;

        tracing::info!("Stopped logging");
    }

    /// Remember a saved camera frame.
    ///
    /// Legal in either state; the reference stays attached to every
    /// following reading until replaced.
    pub fn record_frame_ref(&mut self, frame_ref: impl Into<String>) {
        self.last_frame_ref = Some(frame_ref.into());
    }

    /// Append one reading to the open log.
    ///
    /// No-op while idle. A `timestamp_hint` that does not parse in the
    /// wire format is replaced by the current local time. The line is
    /// flushed before returning; a write or flush failure is returned
    /// as [`SensorLogError::Io`] and the session stays open.
    pub fn append(&mut self, temperature: f64, pressure: f64, timestamp_hint: &str) -> Result<()> {
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };

        let timestamp = codec::parse_timestamp(timestamp_hint.trim()).unwrap_or_else(now_to_second);

        let mut reading = Reading::new(timestamp, temperature, pressure);
        reading.frame_ref = self.last_frame_ref.clone();

        let line = codec::encode_reading(&reading);
        if let Err(e) = file.write_all(line.as_bytes()).and_then(|_| file.flush()) {
            tracing::error!("Error writing to log file: {}", e);
            return Err(SensorLogError::Io(e));
        }

        self.readings.append(reading);
        Ok(())
    }

    /// Load a previously recorded log file into a [`ReadingStore`].
    ///
    /// Pre-flight checks report a missing, unreadable or empty file
    /// before any parsing happens.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<ReadingStore> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SensorLogError::NotFound(path.to_path_buf()));
        }

        let metadata = std::fs::metadata(path).map_err(|e| SensorLogError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        })?;
        if metadata.len() == 0 {
            return Err(SensorLogError::Empty(path.to_path_buf()));
        }

        let contents = std::fs::read_to_string(path).map_err(|e| SensorLogError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        })?;

        let store = ReadingStore::from_lines(contents.lines())?;
        tracing::info!(
            "Loaded {} readings from {} ({} lines skipped)",
            store.len(),
            path.display(),
            store.skipped_lines()
        );
        Ok(store)
    }

    fn ensure_data_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_dir).map_err(|e| SensorLogError::DirectoryUnavailable {
            path: self.data_dir.clone(),
            reason: e.to_string(),
        })?;

        let metadata =
            std::fs::metadata(&self.data_dir).map_err(|e| SensorLogError::DirectoryUnavailable {
                path: self.data_dir.clone(),
                reason: e.to_string(),
            })?;
        if metadata.permissions().readonly() {
            return Err(SensorLogError::DirectoryUnavailable {
                path: self.data_dir.clone(),
                reason: "directory is not writable".to_string(),
            });
        }

        Ok(())
    }

    fn create_log_file(&self) -> Result<(File, PathBuf)> {
        let stamp = Local::now().format(LOG_FILE_STAMP).to_string();

        let mut path = self.data_dir.join(format!("{LOG_FILE_PREFIX}{stamp}.csv"));
        for attempt in 1..=MAX_CREATE_ATTEMPTS {
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => return Ok((file, path)),
                Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                    path = self
                        .data_dir
                        .join(format!("{LOG_FILE_PREFIX}{stamp}_{attempt}.csv"));
                }
                Err(e) => {
                    return Err(SensorLogError::FileCreateFailed { path, source: e });
                }
            }
        }

        Err(SensorLogError::FileCreateFailed {
            path,
            source: std::io::ErrorKind::AlreadyExists.into(),
        })
    }
}

impl Drop for SensorRecorder {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Current local time truncated to whole seconds, matching the wire format
fn now_to_second() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}
