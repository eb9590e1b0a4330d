use std::sync::Arc;

use tracing::info;

/// Transport abstraction standing in for real SMS/WhatsApp/email gateways.
/// A real implementation reports per-send failure through the `Result`; the
/// dispatcher records the failure and keeps going.
pub trait NotificationChannel: Send + Sync {
    fn kind(&self) -> ChannelKind;
    fn deliver(&self, destination: &str, message: &str) -> Result<(), DeliveryError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Email,
    Sms,
    WhatsApp,
}

impl ChannelKind {
    pub const fn name(self) -> &'static str {
        match self {
            ChannelKind::Email => "email",
            ChannelKind::Sms => "sms",
            ChannelKind::WhatsApp => "whatsapp",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Outcome of one channel send for one destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub channel: ChannelKind,
    pub destination: String,
    pub delivered: bool,
}

/// The transports an alert fans out to, grouped so real gateways can
/// replace the simulated ones without touching dispatch logic.
pub struct ChannelSet {
    pub email: Arc<dyn NotificationChannel>,
    pub sms: Arc<dyn NotificationChannel>,
    pub whatsapp: Arc<dyn NotificationChannel>,
}

impl ChannelSet {
    /// Log-only transports used by default deployments.
    pub fn simulated() -> Self {
        Self {
            email: Arc::new(LoggingEmailChannel),
            sms: Arc::new(LoggingSmsChannel),
            whatsapp: Arc::new(LoggingWhatsAppChannel),
        }
    }
}

/// Simulated email transport: logs the send instead of talking to SMTP.
#[derive(Debug, Default)]
pub struct LoggingEmailChannel;

impl NotificationChannel for LoggingEmailChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Email
    }

    fn deliver(&self, destination: &str, message: &str) -> Result<(), DeliveryError> {
        info!(channel = "email", %destination, body = message, "alert delivered");
        Ok(())
    }
}

/// Simulated SMS transport: logs the send instead of calling a gateway.
#[derive(Debug, Default)]
pub struct LoggingSmsChannel;

impl NotificationChannel for LoggingSmsChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::Sms
    }

    fn deliver(&self, destination: &str, message: &str) -> Result<(), DeliveryError> {
        info!(channel = "sms", %destination, body = message, "alert delivered");
        Ok(())
    }
}

/// Simulated WhatsApp transport: logs a `wa.me` link for the destination.
#[derive(Debug, Default)]
pub struct LoggingWhatsAppChannel;

impl NotificationChannel for LoggingWhatsAppChannel {
    fn kind(&self) -> ChannelKind {
        ChannelKind::WhatsApp
    }

    fn deliver(&self, destination: &str, message: &str) -> Result<(), DeliveryError> {
        let link = format!("https://wa.me/{destination}");
        info!(channel = "whatsapp", %destination, %link, body = message, "alert delivered");
        Ok(())
    }
}
