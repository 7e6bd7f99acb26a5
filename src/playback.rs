//! Playback engine for recorded sensor logs
//!
//! [`PlaybackEngine`] replays a loaded [`ReadingStore`] index by index
//! under a periodic tick: play/pause/stop, variable speed, looping, and
//! index- or time-based seeking.
//!
//! # Driving the engine
//!
//! The engine does not own a timer. An external single-threaded driver
//! arms one while [`timer_armed`](PlaybackEngine::timer_armed) is true,
//! dispatching [`tick`](PlaybackEngine::tick) every
//! [`tick_interval`](PlaybackEngine::tick_interval). The interval is
//! derived from the current speed, so drivers re-read it each cycle and
//! a speed change while running takes effect on the next arm. `stop`
//! clears the armed flag before returning; a cooperative driver
//! dispatches no further ticks, and `tick` additionally guards against
//! being called while disarmed.
//!
//! # Events
//!
//! State changes are published on a channel returned by
//! [`PlaybackEngine::new`]:
//!
//! - [`PlaybackEvent::DataPoint`] - the reading to present next. A tick
//!   emits the data point first and advances the index after, so index
//!   observers always see the position one past the point just emitted.
//! - [`PlaybackEvent::IndexChanged`] - the playback cursor moved.
//! - [`PlaybackEvent::Finished`] - the final reading was emitted with
//!   looping disabled. Fires exactly once per run-out.
//!
//! Events are sent inline from the mutating call on an unbounded
//! channel, so a consumer draining the receiver observes them in the
//! exact order the mutations happened.

use std::time::Duration;

use chrono::NaiveDateTime;
use crossbeam_channel::{Receiver, Sender};

use crate::codec;
use crate::store::ReadingStore;
use crate::types::{Reading, Summary};

/// Lowest accepted playback speed multiplier
pub const MIN_SPEED: f64 = 0.1;

/// Highest accepted playback speed multiplier
pub const MAX_SPEED: f64 = 10.0;

/// Seconds jumped by [`PlaybackEngine::forward`] / [`PlaybackEngine::rewind`]
pub const STEP_SECONDS: i64 = 10;

/// Notifications published by the playback engine
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackEvent {
    /// A reading to hand to the presentation layer
    DataPoint {
        temperature: f64,
        pressure: f64,
        /// Wire-format timestamp text
        timestamp: String,
        /// Frame file to display alongside, if any
        frame_ref: Option<String>,
    },
    /// The playback cursor moved to this index
    IndexChanged(usize),
    /// Playback ran out of data with looping disabled
    Finished,
}

/// Timer-driven playback over a loaded reading store
#[derive(Debug)]
pub struct PlaybackEngine {
    store: ReadingStore,
    index: usize,
    playing: bool,
    paused: bool,
    speed: f64,
    loop_enabled: bool,
    statistics: Option<Summary>,
    events: Sender<PlaybackEvent>,
}

impl PlaybackEngine {
    /// Create an engine with no data loaded, returning the receiving
    /// end of its event channel.
    pub fn new() -> (Self, Receiver<PlaybackEvent>) {
        let (events, receiver) = crossbeam_channel::unbounded();
        let engine = Self {
            store: ReadingStore::new(),
            index: 0,
            playing: false,
            paused: false,
            speed: 1.0,
            loop_enabled: false,
            statistics: None,
            events,
        };
        (engine, receiver)
    }

    /// Replace the loaded data.
    ///
    /// Stops any running playback, rewinds to the start and recomputes
    /// the cached statistics. Does not auto-start.
    pub fn load(&mut self, store: ReadingStore) {
        self.stop();
        self.store = store;
        self.index = 0;
        self.statistics = self.store.statistics();
        tracing::info!("Loaded {} readings for playback", self.store.len());
    }

    /// Begin or restart playback.
    ///
    /// No-op without data. Playback that already ran out rewinds to the
    /// start. The current reading is emitted immediately rather than
    /// after the first interval.
    pub fn play(&mut self) {
        if self.store.is_empty() {
            tracing::debug!("No data loaded for playback");
            return;
        }

        if self.index >= self.store.len() {
            self.index = 0;
            let _ = self.events.send(PlaybackEvent::IndexChanged(0));
        }

        self.playing = true;
        self.paused = false;
        self.emit_current();
    }

    /// Toggle pause.
    ///
    /// No-op unless playing. Calling this twice while playing resumes:
    /// the first call disarms the tick, the second re-arms it.
    pub fn pause(&mut self) {
        if !self.playing {
            return;
        }
        self.paused = !self.paused;
    }

    /// Halt playback and rewind to the start
    pub fn stop(&mut self) {
        self.playing = false;
        self.paused = false;
        self.index = 0;
        let _ = self.events.send(PlaybackEvent::IndexChanged(0));
    }

    /// Advance playback by one tick.
    ///
    /// Called by the external timer driver once per interval while
    /// armed. Emits the reading at the current index, then advances;
    /// past the end it either wraps (looping) or stops and reports
    /// [`PlaybackEvent::Finished`].
    pub fn tick(&mut self) {
        if !self.timer_armed() {
            return;
        }

        if self.index >= self.store.len() {
            if self.loop_enabled {
                self.index = 0;
                let _ = self.events.send(PlaybackEvent::IndexChanged(0));
                self.emit_current();
            } else {
                self.stop();
                let _ = self.events.send(PlaybackEvent::Finished);
            }
            return;
        }

        self.emit_current();
        self.index += 1;
        let _ = self.events.send(PlaybackEvent::IndexChanged(self.index));
    }

    /// Jump to a reading by index, clamped into the loaded range.
    ///
    /// No-op without data. Emits the reading at the landing index;
    /// play/pause state is untouched.
    pub fn seek_to_index(&mut self, index: i64) {
        if self.store.is_empty() {
            return;
        }

        let clamped = index.clamp(0, self.store.len() as i64 - 1) as usize;
        self.index = clamped;
        let _ = self.events.send(PlaybackEvent::IndexChanged(clamped));
        self.emit_current();
    }

    /// Jump to the reading closest in time to `timestamp`.
    ///
    /// Distance is absolute milliseconds; on an exact tie the earliest
    /// reading wins. Linear scan over the store.
    pub fn seek_to_timestamp(&mut self, timestamp: NaiveDateTime) {
        if self.store.is_empty() {
            return;
        }

        let readings = self.store.readings();
        let mut best_index = 0usize;
        let mut best_diff = (timestamp - readings[0].timestamp).num_milliseconds().abs();

        for (i, reading) in readings.iter().enumerate().skip(1) {
            let diff = (timestamp - reading.timestamp).num_milliseconds().abs();
            if diff < best_diff {
                best_diff = diff;
                best_index = i;
            }
        }

        self.seek_to_index(best_index as i64);
    }

    /// Jump to the reading closest to the current one plus
    /// `offset_seconds`.
    ///
    /// Distance is absolute whole seconds; the reading currently under
    /// the cursor is the initial candidate, so a scan hit must be
    /// strictly closer to win and ties keep the earlier index.
    pub fn step(&mut self, offset_seconds: i64) {
        if self.store.is_empty() {
            return;
        }

        if self.index >= self.store.len() {
            // Past the end: fold back onto the last reading
            self.seek_to_index(self.index as i64);
            return;
        }

        let readings = self.store.readings();
        let current = readings[self.index].timestamp;
        let target = current + chrono::Duration::seconds(offset_seconds);

        let mut best_index = self.index;
        let mut best_diff = (target - current).num_seconds().abs();

        for (i, reading) in readings.iter().enumerate() {
            let diff = (target - reading.timestamp).num_seconds().abs();
            if diff < best_diff {
                best_diff = diff;
                best_index = i;
            }
        }

        self.seek_to_index(best_index as i64);
    }

    /// Jump forward by [`STEP_SECONDS`]
    pub fn forward(&mut self) {
        self.step(STEP_SECONDS);
    }

    /// Jump backward by [`STEP_SECONDS`]
    pub fn rewind(&mut self) {
        self.step(-STEP_SECONDS);
    }

    /// Set the playback speed multiplier, clamped to
    /// [`MIN_SPEED`]..=[`MAX_SPEED`].
    ///
    /// Does not change play/pause state. The derived tick interval
    /// shrinks or grows accordingly; while paused the change applies
    /// silently on resume.
    pub fn set_speed(&mut self, speed: f64) {
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Enable or disable wrap-around at the end of data
    pub fn set_loop(&mut self, enabled: bool) {
        self.loop_enabled = enabled;
    }

    /// Current playback speed multiplier
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Whether wrap-around is enabled
    pub fn loop_enabled(&self) -> bool {
        self.loop_enabled
    }

    /// True between `play` and `stop`/run-out, including while paused
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// True while playback is suspended by `pause`
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// True while the periodic tick should be dispatched
    pub fn timer_armed(&self) -> bool {
        self.playing && !self.paused
    }

    /// Interval between ticks at the current speed
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis((1000.0 / self.speed).round() as u64)
    }

    /// Position of the playback cursor, `len` meaning past the end
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Number of loaded readings
    pub fn total_readings(&self) -> usize {
        self.store.len()
    }

    /// Timestamp of the reading under the cursor, if the cursor is on one
    pub fn current_timestamp(&self) -> Option<NaiveDateTime> {
        self.store.get(self.index).map(|r| r.timestamp)
    }

    /// The loaded store
    pub fn store(&self) -> &ReadingStore {
        &self.store
    }

    /// Statistics cached by the last [`load`](Self::load)
    pub fn statistics(&self) -> Option<&Summary> {
        self.statistics.as_ref()
    }

    /// Readings between `start` and `end` inclusive, in store order
    pub fn range_query(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> impl Iterator<Item = &Reading> + '_ {
        self.store.range(start, end)
    }

    fn emit_current(&self) {
        if let Some(reading) = self.store.get(self.index) {
            let _ = self.events.send(PlaybackEvent::DataPoint {
                temperature: reading.temperature,
                pressure: reading.pressure,
                timestamp: codec::format_timestamp(reading.timestamp),
                frame_ref: reading.frame_ref.clone(),
            });
        }
    }
}
