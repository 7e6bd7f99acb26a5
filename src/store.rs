//! In-memory reading storage
//!
//! [`ReadingStore`] holds the readings of one log in insertion order.
//! Loaded data is trusted to be chronological, but nothing enforces it:
//! time-based lookups degrade to full scans and stay correct either
//! way. The store owns its readings exclusively; callers get shared
//! references or clones.

use chrono::NaiveDateTime;

use crate::codec;
use crate::error::{Result, SensorLogError};
use crate::types::{ChannelStats, Reading, Summary};

/// Ordered in-memory collection of [`Reading`]s
#[derive(Debug, Clone, Default)]
pub struct ReadingStore {
    readings: Vec<Reading>,
    skipped: usize,
}

impl ReadingStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from the lines of a log file.
    ///
    /// The first line must be an acceptable header
    /// ([`SensorLogError::InvalidFormat`] otherwise). Each following
    /// non-blank line is decoded; lines that fail to decode are skipped
    /// and tallied, never fatal. If nothing survives, the load fails
    /// with [`SensorLogError::NoValidData`]. The skip count stays
    /// available via [`skipped_lines`](Self::skipped_lines).
    pub fn from_lines<'a, I>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut lines = lines.into_iter();

        let header = lines.next().ok_or(SensorLogError::InvalidFormat)?;
        if !codec::decode_header(header) {
            return Err(SensorLogError::InvalidFormat);
        }

        let mut readings = Vec::new();
        let mut skipped = 0usize;

        for (number, raw) in lines.enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            match codec::decode_reading(line) {
                Ok(reading) => readings.push(reading),
                Err(e) => {
                    skipped += 1;
                    // Line numbers are 1-based and include the header
                    tracing::warn!("Skipping line {}: {}", number + 2, e);
                }
            }
        }

        if readings.is_empty() {
            return Err(SensorLogError::NoValidData);
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} invalid lines while loading", skipped);
        }

        Ok(Self { readings, skipped })
    }

    /// Append a reading, preserving insertion order
    pub fn append(&mut self, reading: Reading) {
        self.readings.push(reading);
    }

    /// Number of readings
    pub fn len(&self) -> usize {
        self.readings.len()
    }

    /// True when the store holds no readings
    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Reading at `index`, if in range
    pub fn get(&self, index: usize) -> Option<&Reading> {
        self.readings.get(index)
    }

    /// All readings in store order
    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    /// Iterate over the readings in store order
    pub fn iter(&self) -> std::slice::Iter<'_, Reading> {
        self.readings.iter()
    }

    /// How many lines were dropped by the load that produced this store
    pub fn skipped_lines(&self) -> usize {
        self.skipped
    }

    /// Readings with `start <= timestamp <= end`, inclusive both ends,
    /// in store order. Restartable: call again for a fresh pass.
    pub fn range(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> impl Iterator<Item = &Reading> + '_ {
        self.readings
            .iter()
            .filter(move |r| r.timestamp >= start && r.timestamp <= end)
    }

    /// Summary statistics over all readings, `None` when empty.
    ///
    /// Medians are over the value-sorted samples; start/end times and
    /// the duration follow store order, so a non-chronological store
    /// yields a negative duration, which is reported as-is.
    pub fn statistics(&self) -> Option<Summary> {
        let first = self.readings.first()?;
        let last = self.readings.last()?;

        let temperatures: Vec<f64> = self.readings.iter().map(|r| r.temperature).collect();
        let pressures: Vec<f64> = self.readings.iter().map(|r| r.pressure).collect();

        Some(Summary {
            temperature: ChannelStats::from_samples(&temperatures)?,
            pressure: ChannelStats::from_samples(&pressures)?,
            start_time: first.timestamp,
            end_time: last.timestamp,
            duration_seconds: (last.timestamp - first.timestamp).num_seconds(),
            count: self.readings.len(),
        })
    }
}

impl<'a> IntoIterator for &'a ReadingStore {
    type Item = &'a Reading;
    type IntoIter = std::slice::Iter<'a, Reading>;

    fn into_iter(self) -> Self::IntoIter {
        self.readings.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn store_of(values: &[(u32, f64, f64)]) -> ReadingStore {
        let mut store = ReadingStore::new();
        for &(sec, temp, pressure) in values {
            store.append(Reading::new(ts(10, 0, sec), temp, pressure));
        }
        store
    }

    const HEADER: &str = "Timestamp,Temperature(C),Pressure(hPa),FrameFile";

    #[test]
    fn test_from_lines() {
        let store = ReadingStore::from_lines([
            HEADER,
            "2024-01-15T10:30:00,23.4567,1013.250,frame_1.jpg",
            "2024-01-15T10:30:01,23.5012,1013.100,",
        ])
        .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.skipped_lines(), 0);
        assert_eq!(store.get(0).unwrap().frame_ref.as_deref(), Some("frame_1.jpg"));
        assert!(store.get(1).unwrap().frame_ref.is_none());
    }

    #[test]
    fn test_from_lines_rejects_bad_header() {
        let result = ReadingStore::from_lines(["Time,Temp", "2024-01-15T10:30:00,23.4,1013.2"]);
        assert!(matches!(result, Err(SensorLogError::InvalidFormat)));

        let result = ReadingStore::from_lines([]);
        assert!(matches!(result, Err(SensorLogError::InvalidFormat)));
    }

    #[test]
    fn test_from_lines_skips_invalid_lines() {
        let store = ReadingStore::from_lines([
            HEADER,
            "2024-01-15T10:30:00,23.4,1013.2,",
            "not-a-date,23.5,1013.1,",
            "2024-01-15T10:30:01,oops,1013.1,",
            "2024-01-15T10:30:02,23.6,oops,",
            "too,short",
            "2024-01-15T10:30:03,23.7,1013.0,",
        ])
        .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.skipped_lines(), 4);
    }

    #[test]
    fn test_from_lines_ignores_blank_lines() {
        let store = ReadingStore::from_lines([
            HEADER,
            "",
            "2024-01-15T10:30:00,23.4,1013.2,",
            "   ",
            "2024-01-15T10:30:01,23.5,1013.1,",
        ])
        .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.skipped_lines(), 0);
    }

    #[test]
    fn test_from_lines_no_valid_data() {
        let result = ReadingStore::from_lines([HEADER, "garbage,line,here"]);
        assert!(matches!(result, Err(SensorLogError::NoValidData)));

        let result = ReadingStore::from_lines([HEADER]);
        assert!(matches!(result, Err(SensorLogError::NoValidData)));
    }

    #[test]
    fn test_range_is_inclusive() {
        let store = store_of(&[
            (0, 20.0, 1000.0),
            (10, 21.0, 1001.0),
            (20, 22.0, 1002.0),
            (30, 23.0, 1003.0),
        ]);

        let hits: Vec<_> = store.range(ts(10, 0, 10), ts(10, 0, 20)).collect();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].temperature, 21.0);
        assert_eq!(hits[1].temperature, 22.0);

        // Restartable
        assert_eq!(store.range(ts(10, 0, 10), ts(10, 0, 20)).count(), 2);
    }

    #[test]
    fn test_statistics() {
        let store = store_of(&[
            (0, 10.0, 1000.0),
            (1, 20.0, 1010.0),
            (2, 30.0, 1000.0),
            (3, 40.0, 1010.0),
        ]);

        let summary = store.statistics().unwrap();
        assert_eq!(summary.temperature.min, 10.0);
        assert_eq!(summary.temperature.max, 40.0);
        assert_eq!(summary.temperature.mean, 25.0);
        assert_eq!(summary.temperature.median, 25.0);
        assert_eq!(summary.pressure.median, 1005.0);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.start_time, ts(10, 0, 0));
        assert_eq!(summary.end_time, ts(10, 0, 3));
        assert_eq!(summary.duration_seconds, 3);
    }

    #[test]
    fn test_statistics_empty_store() {
        assert!(ReadingStore::new().statistics().is_none());
    }

    #[test]
    fn test_statistics_non_chronological_duration() {
        // Duration follows store order, not time order
        let mut store = ReadingStore::new();
        store.append(Reading::new(ts(10, 0, 30), 20.0, 1000.0));
        store.append(Reading::new(ts(10, 0, 0), 21.0, 1001.0));

        let summary = store.statistics().unwrap();
        assert_eq!(summary.duration_seconds, -30);
    }
}
