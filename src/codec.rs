//! Log line encoding and decoding
//!
//! The on-disk log is UTF-8 text with `\n`-terminated lines: a column
//! header followed by one line per reading.
//!
//! ```text
//! Timestamp,Temperature(C),Pressure(hPa),FrameFile
//! 2024-01-15T10:30:00,23.4567,1013.250,frame_20240115_103000.jpg
//! 2024-01-15T10:30:01,23.5012,1013.100,
//! ```
//!
//! Timestamps use an ISO-8601-like local date-time with second
//! precision and no offset, which keeps lines lexically sortable by
//! time. Temperature is fixed at 4 decimal digits, pressure at 3. The
//! trailing frame field may be empty.
//!
//! # Forward compatibility
//!
//! Decoding is deliberately permissive: [`decode_header`] only checks
//! that the required column tokens appear somewhere in the line, and
//! [`decode_reading`] ignores any fields past the fourth. A log file
//! written by a future version with extra columns still loads, and an
//! isolated corrupt line costs exactly that line (see
//! [`crate::store::ReadingStore::from_lines`]).

use chrono::NaiveDateTime;

use crate::error::ParseError;
use crate::types::Reading;

/// Column header written at the top of every log file
pub const LOG_HEADER: &str = "Timestamp,Temperature(C),Pressure(hPa),FrameFile";

/// Wire format for timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// The header line, terminated for writing
pub fn encode_header() -> String {
    format!("{}\n", LOG_HEADER)
}

/// Check whether a line is an acceptable log header.
///
/// A contains-check for the three required column tokens in any order,
/// not an exact match.
pub fn decode_header(line: &str) -> bool {
    line.contains("Timestamp") && line.contains("Temperature") && line.contains("Pressure")
}

/// Encode one reading as a `\n`-terminated log line
pub fn encode_reading(reading: &Reading) -> String {
    format!(
        "{},{:.4},{:.3},{}\n",
        reading.timestamp.format(TIMESTAMP_FORMAT),
        reading.temperature,
        reading.pressure,
        reading.frame_ref.as_deref().unwrap_or(""),
    )
}

/// Decode one log line into a [`Reading`].
///
/// Splits on `,` and parses the first three fields (trimmed), failing
/// on the first offending field. A present, non-empty fourth field
/// becomes the frame reference. Blank lines are not valid input here;
/// callers skip them before decoding.
pub fn decode_reading(line: &str) -> Result<Reading, ParseError> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 3 {
        return Err(ParseError::MalformedLine(fields.len()));
    }

    let field = fields[0].trim();
    let timestamp =
        parse_timestamp(field).ok_or_else(|| ParseError::InvalidTimestamp(field.to_string()))?;

    let field = fields[1].trim();
    let temperature: f64 = field
        .parse()
        .map_err(|_| ParseError::InvalidTemperature(field.to_string()))?;

    let field = fields[2].trim();
    let pressure: f64 = field
        .parse()
        .map_err(|_| ParseError::InvalidPressure(field.to_string()))?;

    let frame_ref = fields
        .get(3)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(String::from);

    Ok(Reading {
        timestamp,
        temperature,
        pressure,
        frame_ref,
    })
}

/// Parse a timestamp in the wire format, `None` if it does not conform
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).ok()
}

/// Render a timestamp in the wire format
pub fn format_timestamp(timestamp: NaiveDateTime) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}
