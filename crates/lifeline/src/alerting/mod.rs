//! Emergency alerting: the contact registry, the keyword threat scorer, and
//! simulated notification fan-out behind the HTTP surface.

pub mod directory;
pub mod domain;
pub mod notify;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use directory::{
    ContactDirectory, DirectoryError, InMemoryContactDirectory, JsonFileContactDirectory,
};
pub use domain::{ContactKind, GeoLocation, UserId, UserRecord};
pub use notify::{
    ChannelKind, ChannelSet, DeliveryError, DeliveryReceipt, LoggingEmailChannel,
    LoggingSmsChannel, LoggingWhatsAppChannel, NotificationChannel,
};
pub use router::alerting_router;
pub use scoring::{recommendations, ThreatAssessment, ThreatScorer, MAX_THREAT_SCORE};
pub use service::{AlertOutcome, AlertReport, SafetyService};
