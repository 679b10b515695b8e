//! Vitals evaluation: status classification, composite scoring and
//! threshold alerting, plus escalation and per-user monitoring on top.

pub mod alerts;
pub mod bands;
pub mod classify;
pub mod escalation;
pub mod messages;
pub mod monitor;
pub mod score;

pub use alerts::{evaluate, AlertEvent, EscalationTarget};
pub use bands::MetricBand;
pub use classify::{classify, classify_name, classify_reading, MetricStatus};
pub use escalation::{
    dispatch_escalation, EscalationInstruction, EscalationOutcome, LogNotifier, Notifier,
    NotifyError,
};
pub use messages::AlertMessages;
pub use monitor::{VitalsAssessment, VitalsMonitor};
pub use score::{score, score_breakdown, Deduction, HealthScore, ScoreBreakdown};
