//! HTTP handlers for the push notification relay
//!
//! Bodies are read as raw bytes and parsed leniently: a malformed body is
//! treated like an empty one and rejected by validation with a 400.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use brio_common::{config_error, BrioError};
use std::sync::Arc;
use tracing::{debug, error};

use crate::client::NotificationHubClient;
use crate::error::NotificationError;
use crate::models::{SendRequest, SendResponse, SubscribeRequest, SubscribeResponse};

/// Shared state for notification handlers
#[derive(Clone)]
pub struct NotificationState {
    /// The hub client, or why it could not be built
    pub hub: Result<Arc<NotificationHubClient>, String>,
    pub vapid_public_key: Option<String>,
}

impl NotificationState {
    fn hub(&self) -> Result<&NotificationHubClient, BrioError> {
        self.hub.as_deref().map_err(|reason| {
            error!("Notification hub is not configured: {}", reason);
            config_error(reason)
        })
    }
}

fn status_or_bad_gateway(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
}

/// Sends a push notification to every browser subscribed to a shipment
///
/// # Responses
///
/// - 2xx: mirrored from the hub, notification accepted
/// - 400 Bad Request: `envio_id` missing
/// - 4xx/5xx: mirrored from the hub when it rejects the request
/// - 500 Internal Server Error: hub not configured
/// - 502 Bad Gateway: hub unreachable
pub async fn send_notification_handler(
    State(state): State<Arc<NotificationState>>,
    body: Bytes,
) -> Response {
    let request = SendRequest::from_body(&body);
    let shipment_id = match request.shipment_id() {
        Ok(id) => id,
        Err(err) => return BrioError::from(err).into_response(),
    };
    let hub = match state.hub() {
        Ok(hub) => hub,
        Err(err) => return err.into_response(),
    };

    let payload = request.payload_or_default();
    debug!("Relaying notification for shipment {}", shipment_id);

    let response_for = |status: u16, reason: String, text: String| {
        (
            status_or_bad_gateway(status),
            Json(SendResponse {
                status,
                reason,
                text,
                hub: hub.hub().to_string(),
                resource: hub.messages_url(),
            }),
        )
            .into_response()
    };

    match hub.send_to_shipment(shipment_id, &payload).await {
        Ok(ok) => response_for(ok.status, ok.reason, ok.text),
        Err(NotificationError::Upstream {
            status,
            reason,
            text,
        }) => response_for(status, reason, text),
        Err(NotificationError::Transport(e)) => response_for(
            StatusCode::BAD_GATEWAY.as_u16(),
            "Bad Gateway".to_string(),
            e.to_string(),
        ),
        Err(other) => BrioError::from(other).into_response(),
    }
}

/// Registers a browser push subscription with the hub
///
/// # Responses
///
/// - 2xx: mirrored from the hub
/// - 400 Bad Request: `Suscripción incompleta`
/// - 4xx/5xx: mirrored from the hub when it rejects the installation
/// - 500 Internal Server Error: hub not configured
/// - 502 Bad Gateway: hub unreachable
pub async fn subscribe_handler(State(state): State<Arc<NotificationState>>, body: Bytes) -> Response {
    let installation = match SubscribeRequest::from_body(&body).into_installation() {
        Ok(installation) => installation,
        Err(err) => return BrioError::from(err).into_response(),
    };
    let hub = match state.hub() {
        Ok(hub) => hub,
        Err(err) => return err.into_response(),
    };

    let (status, text) = match hub.register_installation(&installation).await {
        Ok(ok) => (ok.status, ok.text),
        Err(NotificationError::Upstream { status, text, .. }) => (status, text),
        Err(NotificationError::Transport(e)) => (StatusCode::BAD_GATEWAY.as_u16(), e.to_string()),
        Err(other) => return BrioError::from(other).into_response(),
    };

    (
        status_or_bad_gateway(status),
        Json(SubscribeResponse { status, text }),
    )
        .into_response()
}

/// Public VAPID key the browser needs to subscribe, as a JSON string
pub async fn vapid_public_handler(State(state): State<Arc<NotificationState>>) -> Response {
    match state
        .vapid_public_key
        .as_deref()
        .filter(|key| !key.trim().is_empty())
    {
        Some(key) => Json(key).into_response(),
        None => {
            error!("VAPID public key is not configured");
            config_error("VAPID public key is not configured").into_response()
        }
    }
}
