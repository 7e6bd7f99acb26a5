//! # sensorlog-rs: sensor time-series recording & playback
//!
//! A record-and-replay engine for environmental sensor data: readings
//! (temperature, pressure, optional camera-frame reference) are
//! timestamped, persisted as an append-only CSV log, and later reloaded
//! for deterministic, speed-controllable, seekable playback with
//! on-demand summary statistics.
//!
//! ## Architecture
//!
//! - **Codec** ([`codec`]): the log line format - encoding, permissive
//!   decoding with per-line error classification
//! - **Store** ([`store`]): ordered in-memory readings with range
//!   queries and statistics
//! - **Recorder** ([`recorder`]): owns the open log file, appends and
//!   flushes readings as they arrive, tracks the latest saved frame
//! - **Playback** ([`playback`]): timer-driven state machine replaying
//!   a loaded store, publishing data points on an event channel
//! - **Sensor** ([`sensor`]): simulated acquisition source for demos
//!   and tests
//!
//! Everything runs on one logical thread: acquisition notifications,
//! recorder appends and playback ticks are plain method calls that run
//! to completion before the next is dispatched.
//!
//! ## Log format
//!
//! ```text
//! Timestamp,Temperature(C),Pressure(hPa),FrameFile
//! 2024-01-15T10:30:00,23.4567,1013.250,frame_20240115_103000.jpg
//! 2024-01-15T10:30:01,23.5012,1013.100,
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use sensorlog_rs::{PlaybackEngine, PlaybackEvent, SensorRecorder};
//!
//! fn main() -> sensorlog_rs::Result<()> {
//!     let mut recorder = SensorRecorder::new("data");
//!     let path = recorder.start()?;
//!     recorder.append(23.4, 1013.2, "2024-01-15T10:30:00")?;
//!     recorder.stop();
//!
//!     let store = recorder.load(&path)?;
//!     let (mut engine, events) = PlaybackEngine::new();
//!     engine.load(store);
//!     engine.play();
//!     while engine.timer_armed() {
//!         std::thread::sleep(engine.tick_interval());
//!         engine.tick();
//!     }
//!     for event in events.try_iter() {
//!         if let PlaybackEvent::DataPoint { temperature, .. } = event {
//!             println!("{temperature} C");
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod playback;
pub mod recorder;
pub mod sensor;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{ParseError, Result, SensorLogError};
pub use playback::{PlaybackEngine, PlaybackEvent};
pub use recorder::{RecorderState, SensorRecorder};
pub use sensor::{SensorSample, SensorSimulator};
pub use store::ReadingStore;
pub use types::{ChannelStats, Reading, Summary};
