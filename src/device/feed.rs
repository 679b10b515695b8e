//! Background device sync.
//!
//! Spawns a thread that emits one simulated reading every
//! `sync_interval_ms` until `sync_duration_ms` has elapsed, the receiver
//! hangs up, or shutdown is requested.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::MonitorConfig;
use crate::models::VitalReading;

use super::simulator::DeviceSimulator;

/// Sleep granularity for shutdown responsiveness.
const SLEEP_GRANULARITY_MS: u64 = 10;

/// Handle for the device feed thread.
///
/// Supports shutdown via `shutdown()` or automatic cleanup on `Drop`.
pub struct DeviceFeedHandle {
    shutdown: Arc<AtomicBool>,
    handle: Option<std::thread::JoinHandle<()>>,
}

impl DeviceFeedHandle {
    /// Stop after the current tick. No further readings are sent.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }
}

impl Drop for DeviceFeedHandle {
    fn drop(&mut self) {
        self.shutdown();
        if let Some(h) = self.handle.take() {
            let _ = h.join();
        }
    }
}

/// Start a sync burst on a separate thread. Readings arrive on `sender`.
pub fn start_device_feed(
    simulator: DeviceSimulator,
    config: &MonitorConfig,
    sender: Sender<VitalReading>,
) -> DeviceFeedHandle {
    let shutdown = Arc::new(AtomicBool::new(false));
    let flag = shutdown.clone();
    let interval = Duration::from_millis(config.sync_interval_ms.max(1));
    let duration = Duration::from_millis(config.sync_duration_ms);

    let handle = std::thread::spawn(move || {
        tracing::info!(
            interval_ms = interval.as_millis() as u64,
            duration_ms = duration.as_millis() as u64,
            "Device sync started"
        );
        let sent = feed_loop(simulator, interval, duration, &sender, &flag);
        tracing::info!(readings = sent, "Device sync finished");
    });

    DeviceFeedHandle {
        shutdown,
        handle: Some(handle),
    }
}

fn feed_loop(
    mut simulator: DeviceSimulator,
    interval: Duration,
    duration: Duration,
    sender: &Sender<VitalReading>,
    shutdown: &AtomicBool,
) -> usize {
    let started = Instant::now();
    let mut sent = 0;
    let mut next_tick = interval;

    while next_tick <= duration {
        // Sleep in small increments for responsive shutdown
        while started.elapsed() < next_tick {
            if shutdown.load(Ordering::Relaxed) {
                return sent;
            }
            let remaining = next_tick.saturating_sub(started.elapsed());
            std::thread::sleep(remaining.min(Duration::from_millis(SLEEP_GRANULARITY_MS)));
        }
        if shutdown.load(Ordering::Relaxed) {
            return sent;
        }

        let reading = simulator.sync_reading(chrono::Local::now().naive_local());
        if sender.send(reading).is_err() {
            tracing::debug!("Device feed receiver dropped, stopping");
            return sent;
        }
        sent += 1;
        next_tick += interval;
    }
    sent
}
