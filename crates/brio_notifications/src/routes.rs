use axum::{
    routing::{get, post},
    Router,
};
use brio_config::AppConfig;
use std::sync::Arc;
use tracing::{info, warn};

use crate::client::NotificationHubClient;
use crate::handlers::{
    send_notification_handler, subscribe_handler, vapid_public_handler, NotificationState,
};

/// Create notification routes for the API
///
/// A missing or invalid hub configuration does not prevent the routes from
/// mounting; the send and subscribe endpoints answer 500 until it is fixed.
///
/// # Arguments
///
/// * `config` - The application configuration with the `notification_hub` and `web_push` sections
pub fn routes(config: Arc<AppConfig>) -> Router {
    let hub = match config.notification_hub.as_ref() {
        Some(hub_config) => NotificationHubClient::from_config(hub_config)
            .map(Arc::new)
            .map_err(|e| e.to_string()),
        None => Err("Notification hub configuration is missing".to_string()),
    };
    if let Err(reason) = &hub {
        warn!("Notification hub disabled: {}", reason);
    }

    let vapid_public_key = config
        .web_push
        .as_ref()
        .and_then(|web_push| web_push.vapid_public_key.clone());

    routes_with_state(NotificationState {
        hub,
        vapid_public_key,
    })
}

/// Create notification routes around an already built state
pub fn routes_with_state(state: NotificationState) -> Router {
    info!("Notification routes initialized");

    Router::new()
        .route("/notifications/send", post(send_notification_handler))
        .route("/notifications/subscribe", post(subscribe_handler))
        .route("/notifications/vapid-public", get(vapid_public_handler))
        .with_state(Arc::new(state))
}
