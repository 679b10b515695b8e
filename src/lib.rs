pub mod config;
pub mod models;
pub mod vitals; // Classifier, scorer, alerter + escalation
pub mod store;
pub mod trends; // Vitals trends and nutrition summaries
pub mod device; // Simulated wearable feed

pub use config::MonitorConfig;
pub use models::{EmergencyContact, Meal, Metric, VitalReading, VitalStatus};
pub use vitals::{classify, evaluate, score, AlertEvent, HealthScore, VitalsMonitor};

/// Load the monitor config and install logging. Returns the loaded config.
pub fn init() -> MonitorConfig {
    let config = MonitorConfig::load_or_default();
    config::init_tracing(&config.log_filter);
    config
}
