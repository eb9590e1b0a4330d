use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde_json::Value;

use crate::alerting::directory::InMemoryContactDirectory;
use crate::alerting::domain::{UserId, UserRecord};
use crate::alerting::notify::{ChannelKind, ChannelSet, DeliveryError, NotificationChannel};
use crate::alerting::service::SafetyService;

/// Channel double recording each destination it successfully reached.
pub(crate) struct RecordingChannel {
    kind: ChannelKind,
    fail: bool,
    deliveries: Mutex<Vec<String>>,
}

impl RecordingChannel {
    pub(crate) fn new(kind: ChannelKind) -> Arc<Self> {
        Arc::new(Self {
            kind,
            fail: false,
            deliveries: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn failing(kind: ChannelKind) -> Arc<Self> {
        Arc::new(Self {
            kind,
            fail: true,
            deliveries: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn deliveries(&self) -> Vec<String> {
        self.deliveries.lock().expect("channel mutex poisoned").clone()
    }
}

impl NotificationChannel for RecordingChannel {
    fn kind(&self) -> ChannelKind {
        self.kind
    }

    fn deliver(&self, destination: &str, _message: &str) -> Result<(), DeliveryError> {
        if self.fail {
            return Err(DeliveryError::Transport("gateway offline".to_string()));
        }
        self.deliveries
            .lock()
            .expect("channel mutex poisoned")
            .push(destination.to_string());
        Ok(())
    }
}

pub(crate) struct ChannelProbes {
    pub(crate) email: Arc<RecordingChannel>,
    pub(crate) sms: Arc<RecordingChannel>,
    pub(crate) whatsapp: Arc<RecordingChannel>,
}

pub(crate) fn probed_channels() -> (ChannelSet, ChannelProbes) {
    let email = RecordingChannel::new(ChannelKind::Email);
    let sms = RecordingChannel::new(ChannelKind::Sms);
    let whatsapp = RecordingChannel::new(ChannelKind::WhatsApp);

    let set = ChannelSet {
        email: email.clone(),
        sms: sms.clone(),
        whatsapp: whatsapp.clone(),
    };

    (
        set,
        ChannelProbes {
            email,
            sms,
            whatsapp,
        },
    )
}

pub(crate) fn probed_service() -> (Arc<SafetyService<InMemoryContactDirectory>>, ChannelProbes) {
    let (channels, probes) = probed_channels();
    let service = Arc::new(SafetyService::new(
        Arc::new(InMemoryContactDirectory::default()),
        channels,
    ));
    (service, probes)
}

pub(crate) fn user_record(user_id: &str, phone: &str, contacts: &[&str]) -> UserRecord {
    UserRecord {
        user_id: UserId(user_id.to_string()),
        phone: phone.to_string(),
        email: String::new(),
        emergency_contacts: contacts.iter().map(|c| (*c).to_string()).collect(),
        registered_at: Utc::now(),
    }
}

pub(crate) async fn read_json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is json")
}
