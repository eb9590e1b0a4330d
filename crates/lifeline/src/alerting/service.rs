use std::sync::Arc;

use chrono::{Local, Utc};
use tracing::{info, warn};

use super::directory::{ContactDirectory, DirectoryError};
use super::domain::{ContactKind, GeoLocation, UserId, UserRecord};
use super::notify::{ChannelSet, DeliveryReceipt, NotificationChannel};
use super::scoring::{ThreatAssessment, ThreatScorer};

/// Service composing the contact directory, the notification transports,
/// and the text scorer behind the HTTP surface.
pub struct SafetyService<D> {
    directory: Arc<D>,
    channels: ChannelSet,
    scorer: ThreatScorer,
}

/// Result of an alert dispatch. A missing registration is a normal variant
/// the caller reports back to the client, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum AlertOutcome {
    Sent(AlertReport),
    NotRegistered,
}

/// Everything produced while fanning one alert out to a user's contacts.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertReport {
    pub user_id: UserId,
    pub location: GeoLocation,
    /// One `"channel: contact"` label per stored contact.
    pub contacts_notified: Vec<String>,
    /// One entry per channel send; phone contacts produce two (SMS and
    /// WhatsApp).
    pub receipts: Vec<DeliveryReceipt>,
    pub maps_link: String,
    pub message: String,
}

impl<D> SafetyService<D>
where
    D: ContactDirectory + 'static,
{
    pub fn new(directory: Arc<D>, channels: ChannelSet) -> Self {
        Self {
            directory,
            channels,
            scorer: ThreatScorer::new(),
        }
    }

    /// Store (or wholesale replace) a user's profile and emergency
    /// contacts.
    pub fn register_user(
        &self,
        user_id: UserId,
        phone: String,
        email: String,
        emergency_contacts: Vec<String>,
    ) -> Result<(), DirectoryError> {
        let record = UserRecord {
            user_id: user_id.clone(),
            phone,
            email,
            emergency_contacts,
            registered_at: Utc::now(),
        };
        self.directory.register(record)?;

        let registered = self.directory.user_ids()?;
        info!(user_id = %user_id, registered = registered.len(), "user registered");
        Ok(())
    }

    pub fn profile(&self, user_id: &UserId) -> Result<Option<UserRecord>, DirectoryError> {
        self.directory.lookup(user_id)
    }

    /// Score a piece of submitted text.
    pub fn assess_text(&self, text: &str) -> ThreatAssessment {
        self.scorer.score(text)
    }

    /// Fan an emergency alert out to the user's stored contacts. Email
    /// contacts get one send; phone contacts get SMS and WhatsApp sends
    /// under a single combined label.
    pub fn dispatch_alert(
        &self,
        user_id: &UserId,
        location: GeoLocation,
    ) -> Result<AlertOutcome, DirectoryError> {
        let Some(record) = self.directory.lookup(user_id)? else {
            warn!(user_id = %user_id, "alert requested for unregistered user");
            return Ok(AlertOutcome::NotRegistered);
        };

        let maps_link = location.maps_link();
        let message = alert_message(user_id, &maps_link);

        let mut contacts_notified = Vec::new();
        let mut receipts = Vec::new();
        for contact in &record.emergency_contacts {
            let kind = ContactKind::classify(contact);
            match kind {
                ContactKind::Email => {
                    receipts.push(send_via(self.channels.email.as_ref(), contact, &message));
                }
                ContactKind::Phone => {
                    receipts.push(send_via(self.channels.sms.as_ref(), contact, &message));
                    receipts.push(send_via(self.channels.whatsapp.as_ref(), contact, &message));
                }
            }
            contacts_notified.push(format!("{}: {}", kind.label(), contact));
        }

        info!(
            user_id = %user_id,
            contacts = contacts_notified.len(),
            "emergency alert dispatched"
        );

        Ok(AlertOutcome::Sent(AlertReport {
            user_id: user_id.clone(),
            location,
            contacts_notified,
            receipts,
            maps_link,
            message,
        }))
    }
}

/// One failed send must not abort delivery to the remaining contacts; the
/// failure is captured in the receipt instead.
fn send_via(
    channel: &dyn NotificationChannel,
    destination: &str,
    message: &str,
) -> DeliveryReceipt {
    let delivered = match channel.deliver(destination, message) {
        Ok(()) => true,
        Err(err) => {
            warn!(
                channel = channel.kind().name(),
                %destination,
                %err,
                "delivery failed"
            );
            false
        }
    };

    DeliveryReceipt {
        channel: channel.kind(),
        destination: destination.to_string(),
        delivered,
    }
}

fn alert_message(user_id: &UserId, maps_link: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!(
        "🚨 EMERGENCY ALERT 🚨\n\nUser {user_id} needs immediate help!\n\nLocation: {maps_link}\n\nTime: {timestamp}\n\nPlease contact them immediately or call emergency services."
    )
}
