//! Simulated wearable device. A stand-in data source, not a real
//! integration.

pub mod feed;
pub mod simulator;

pub use feed::{start_device_feed, DeviceFeedHandle};
pub use simulator::{DeviceSimulator, ReadingRanges, BASELINE_RANGES, SYNC_RANGES};
