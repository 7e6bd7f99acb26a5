//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

use std::path::PathBuf;

/// Assert two floats are approximately equal
pub fn assert_float_eq(a: f64, b: f64, epsilon: f64) {
    assert!(
        (a - b).abs() < epsilon,
        "Expected {} to be approximately equal to {} (epsilon: {})",
        a,
        b,
        epsilon
    );
}

/// A small well-formed log: four readings over three seconds, two of
/// them with frames
pub fn sample_log_text() -> String {
    "Timestamp,Temperature(C),Pressure(hPa),FrameFile\n\
     2024-01-15T10:30:00,10.0000,1000.000,\n\
     2024-01-15T10:30:01,20.0000,1010.000,frame_a.jpg\n\
     2024-01-15T10:30:02,30.0000,1000.000,frame_a.jpg\n\
     2024-01-15T10:30:03,40.0000,1010.000,frame_b.jpg\n"
        .to_string()
}

/// Write `contents` to `name` inside `dir`, returning the full path
pub fn write_log(dir: &std::path::Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
