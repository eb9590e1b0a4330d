use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for registered users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Profile stored for each registered user. Re-registration replaces the
/// whole record; there is no field-level merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: UserId,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub emergency_contacts: Vec<String>,
    pub registered_at: DateTime<Utc>,
}

/// Coordinates reported by the client when an alert fires.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoLocation {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

impl GeoLocation {
    /// Google Maps link for the coordinates. Debug formatting keeps the
    /// trailing `.0` on whole-number coordinates.
    pub fn maps_link(&self) -> String {
        format!(
            "https://maps.google.com/maps?q={:?},{:?}",
            self.latitude, self.longitude
        )
    }
}

/// How a stored emergency contact is reached. Email addresses are
/// recognized by the presence of '@'; everything else is treated as a
/// phone number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Email,
    Phone,
}

impl ContactKind {
    pub fn classify(contact: &str) -> Self {
        if contact.contains('@') {
            Self::Email
        } else {
            Self::Phone
        }
    }

    /// Label prefix used in the `contacts_notified` response field.
    pub const fn label(self) -> &'static str {
        match self {
            ContactKind::Email => "Email",
            ContactKind::Phone => "SMS/WhatsApp",
        }
    }
}
