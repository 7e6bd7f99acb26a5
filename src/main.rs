//! Sensor Dashboard demo driver
//!
//! Records a short simulated acquisition session to a log file, then
//! replays it at speed. All the interesting behavior lives in the
//! library; this binary only wires the pieces together on one thread.

use sensorlog_rs::{AppConfig, PlaybackEngine, PlaybackEvent, SensorRecorder, SensorSimulator};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Samples recorded by the demo session
const DEMO_SAMPLES: usize = 10;

/// Playback speed for the replay half of the demo
const DEMO_REPLAY_SPEED: f64 = 4.0;

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load_or_default();
    std::fs::create_dir_all(&config.data_dir)?;

    // Log to stderr and to a rolling file next to the recorded data
    let file_appender = tracing_appender::rolling::daily(&config.data_dir, "sensorlog.log");
    let (file_writer, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sensorlog_rs=trace")),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(file_writer))
        .init();

    tracing::info!("Starting sensor dashboard demo");

    // -------- Record --------
    let mut simulator = SensorSimulator::new();
    simulator.set_sampling_rate(config.sampling_rate_hz);

    let mut recorder = SensorRecorder::new(config.data_dir.clone());
    let path = recorder.start()?;

    if let Some(sample) = simulator.start() {
        recorder.append(sample.temperature, sample.pressure, &sample.timestamp)?;
    }
    for i in 1..DEMO_SAMPLES {
        std::thread::sleep(simulator.sample_interval());

        // A frame lands every few samples, as the camera side would report
        if i % 3 == 0 {
            recorder.record_frame_ref(format!("frame_{i:04}.jpg"));
        }

        let sample = simulator.sample();
        if let Err(e) = recorder.append(sample.temperature, sample.pressure, &sample.timestamp) {
            tracing::warn!("Dropped sample: {}", e);
        }
    }
    simulator.stop();
    recorder.stop();

    // -------- Replay --------
    let store = recorder.load(&path)?;
    let (mut engine, events) = PlaybackEngine::new();
    engine.load(store);

    if let Some(stats) = engine.statistics() {
        tracing::info!(
            "Session: {} readings over {} s, temperature {:.2}..{:.2} C (median {:.2}), pressure {:.2}..{:.2} hPa",
            stats.count,
            stats.duration_seconds,
            stats.temperature.min,
            stats.temperature.max,
            stats.temperature.median,
            stats.pressure.min,
            stats.pressure.max,
        );
    }

    engine.set_speed(DEMO_REPLAY_SPEED);
    engine.play();
    loop {
        for event in events.try_iter() {
            match event {
                PlaybackEvent::DataPoint {
                    temperature,
                    pressure,
                    timestamp,
                    frame_ref,
                } => tracing::info!(
                    "{}  {:.4} C  {:.3} hPa  frame={}",
                    timestamp,
                    temperature,
                    pressure,
                    frame_ref.as_deref().unwrap_or("-"),
                ),
                PlaybackEvent::Finished => tracing::info!("Playback finished"),
                PlaybackEvent::IndexChanged(_) => {}
            }
        }

        if !engine.timer_armed() {
            break;
        }
        std::thread::sleep(engine.tick_interval());
        engine.tick();
    }

    // Persist the config so the next run picks up the same settings
    if let Err(e) = config.save() {
        tracing::warn!("Failed to save config: {}", e);
    }

    tracing::info!("Demo complete, log kept at {}", path.display());
    Ok(())
}
