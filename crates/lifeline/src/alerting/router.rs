use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use super::directory::ContactDirectory;
use super::domain::{GeoLocation, UserId};
use super::scoring;
use super::service::{AlertOutcome, SafetyService};

/// Router builder exposing the alerting HTTP surface. Domain "not found"
/// outcomes stay HTTP 200 response variants for client compatibility;
/// malformed payloads are rejected by the typed extractors.
pub fn alerting_router<D>(service: Arc<SafetyService<D>>) -> Router
where
    D: ContactDirectory + 'static,
{
    Router::new()
        .route("/api/google-login", post(google_login_handler))
        .route("/api/register", post(register_handler::<D>))
        .route("/api/threat-detection", post(threat_detection_handler::<D>))
        .route("/api/emergency-alert", post(emergency_alert_handler::<D>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleLoginRequest {
    #[serde(default)]
    pub(crate) google_token: Option<String>,
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) name: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct GoogleLoginResponse {
    pub(crate) success: bool,
    pub(crate) user_id: String,
    pub(crate) email: String,
    pub(crate) name: Option<String>,
}

pub(crate) async fn google_login_handler(
    Json(payload): Json<GoogleLoginRequest>,
) -> Json<GoogleLoginResponse> {
    // The token is trusted as-is. Production needs verification against the
    // Google identity endpoint before this derived identity can be used.
    warn!(
        email = %payload.email,
        token_present = payload.google_token.is_some(),
        "accepting google login without token verification"
    );

    let user_id = payload
        .email
        .split('@')
        .next()
        .unwrap_or_default()
        .to_string();

    Json(GoogleLoginResponse {
        success: true,
        user_id,
        email: payload.email,
        name: payload.name,
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterRequest {
    pub(crate) user_id: String,
    pub(crate) phone: String,
    #[serde(default)]
    pub(crate) email: String,
    #[serde(default)]
    pub(crate) emergency_contacts: Vec<String>,
}

pub(crate) async fn register_handler<D>(
    State(service): State<Arc<SafetyService<D>>>,
    Json(payload): Json<RegisterRequest>,
) -> Response
where
    D: ContactDirectory + 'static,
{
    let outcome = service.register_user(
        UserId(payload.user_id),
        payload.phone,
        payload.email,
        payload.emergency_contacts,
    );

    match outcome {
        Ok(()) => Json(json!({
            "success": true,
            "message": "User registered successfully",
        }))
        .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ThreatDetectionRequest {
    #[serde(default)]
    pub(crate) text: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ThreatDetectionResponse {
    pub(crate) threat_detected: bool,
    pub(crate) threat_level: u8,
    pub(crate) recommendations: Vec<String>,
}

pub(crate) async fn threat_detection_handler<D>(
    State(service): State<Arc<SafetyService<D>>>,
    Json(payload): Json<ThreatDetectionRequest>,
) -> Json<ThreatDetectionResponse>
where
    D: ContactDirectory + 'static,
{
    let assessment = service.assess_text(&payload.text);

    Json(ThreatDetectionResponse {
        threat_detected: assessment.is_threat,
        threat_level: assessment.threat_score,
        recommendations: scoring::recommendations(assessment.threat_score),
    })
}

#[derive(Debug, Deserialize)]
pub(crate) struct EmergencyAlertRequest {
    pub(crate) user_id: String,
    #[serde(default)]
    pub(crate) location: GeoLocation,
}

#[derive(Debug, Serialize)]
pub(crate) struct EmergencyAlertResponse {
    pub(crate) alert_sent: bool,
    pub(crate) emergency_contacts_notified: usize,
    pub(crate) contacts_notified: Vec<String>,
    pub(crate) location: GeoLocation,
    pub(crate) maps_link: String,
    pub(crate) message: String,
}

pub(crate) async fn emergency_alert_handler<D>(
    State(service): State<Arc<SafetyService<D>>>,
    Json(payload): Json<EmergencyAlertRequest>,
) -> Response
where
    D: ContactDirectory + 'static,
{
    let user_id = UserId(payload.user_id);

    match service.dispatch_alert(&user_id, payload.location) {
        Ok(AlertOutcome::Sent(report)) => {
            let notified = report.contacts_notified.len();
            Json(EmergencyAlertResponse {
                alert_sent: true,
                emergency_contacts_notified: notified,
                contacts_notified: report.contacts_notified,
                location: report.location,
                maps_link: report.maps_link,
                message: format!(
                    "Emergency alert sent to {notified} contacts with live location"
                ),
            })
            .into_response()
        }
        Ok(AlertOutcome::NotRegistered) => Json(json!({
            "alert_sent": false,
            "error": "User not registered",
        }))
        .into_response(),
        Err(err) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}
