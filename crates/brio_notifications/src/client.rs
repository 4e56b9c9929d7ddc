//! Notification hub client
//!
//! Sends web push notifications tagged with a shipment and registers browser
//! installations. A token is signed for every request; nothing is retried.

use brio_config::{KeyEncoding, NotificationHubConfig};
use reqwest::{header, Client, Response};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::error::{excerpt, NotificationError};
use crate::models::Installation;
use crate::sas::{HubConnection, NotificationToken, DEFAULT_TOKEN_TTL_SECS};

pub const API_VERSION: &str = "2015-01";
pub const DEFAULT_FORMAT: &str = "webpush";
pub const DEFAULT_SEND_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_REGISTER_TIMEOUT_SECS: u64 = 10;

const CONTENT_TYPE_JSON_UTF8: &str = "application/json;charset=utf-8";
const HEADER_FORMAT: &str = "ServiceBusNotification-Format";
const HEADER_TAGS: &str = "ServiceBusNotification-Tags";
const HEADER_MS_VERSION: &str = "x-ms-version";

/// Routing tag for notifications about one shipment
pub fn shipment_tag(shipment_id: &str) -> String {
    format!("envio:{}", shipment_id)
}

/// What the hub answered to a successful request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubResponse {
    pub status: u16,
    pub reason: String,
    pub text: String,
}

impl HubResponse {
    async fn read(response: Response) -> Self {
        let status = response.status();
        let text = response.text().await.unwrap_or_else(|e| {
            warn!("Could not read notification hub response body: {}", e);
            String::new()
        });
        Self {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            text: excerpt(&text),
        }
    }

    fn into_result(self) -> Result<Self, NotificationError> {
        if (200..300).contains(&self.status) {
            Ok(self)
        } else {
            Err(NotificationError::Upstream {
                status: self.status,
                reason: self.reason,
                text: self.text,
            })
        }
    }
}

/// Client for one notification hub
#[derive(Debug, Clone)]
pub struct NotificationHubClient {
    client: Client,
    connection: HubConnection,
    token_ttl_secs: u64,
    key_encoding: KeyEncoding,
    format: String,
    send_timeout: Duration,
    register_timeout: Duration,
}

impl NotificationHubClient {
    /// Creates a client from the `notification_hub` configuration section
    ///
    /// # Errors
    ///
    /// `NotificationError::ConfigError` when the connection string is missing
    /// or invalid, or no hub name can be determined.
    pub fn from_config(config: &NotificationHubConfig) -> Result<Self, NotificationError> {
        let connection_string = config
            .connection_string
            .as_deref()
            .filter(|cs| !cs.trim().is_empty())
            .ok_or_else(|| {
                NotificationError::ConfigError("Notification hub connection string is missing".to_string())
            })?;
        let connection = HubConnection::parse(connection_string, config.hub_name.as_deref())?;

        Ok(Self {
            client: brio_common::HTTP_CLIENT.clone(),
            connection,
            token_ttl_secs: config.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS),
            key_encoding: config.key_encoding,
            format: config
                .format
                .clone()
                .filter(|f| !f.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FORMAT.to_string()),
            send_timeout: Duration::from_secs(
                config.send_timeout_secs.unwrap_or(DEFAULT_SEND_TIMEOUT_SECS),
            ),
            register_timeout: Duration::from_secs(
                config
                    .register_timeout_secs
                    .unwrap_or(DEFAULT_REGISTER_TIMEOUT_SECS),
            ),
        })
    }

    /// Use a specific HTTP client instead of the shared one
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn hub(&self) -> &str {
        &self.connection.hub
    }

    /// URL notifications are posted to
    pub fn messages_url(&self) -> String {
        self.connection.messages_url()
    }

    /// A freshly signed `Authorization` value
    pub fn authorization(&self) -> Result<String, NotificationError> {
        NotificationToken::generate(&self.connection, self.token_ttl_secs, self.key_encoding)
            .map(|token| token.to_string())
    }

    /// Sends `payload` to every subscription tagged with the shipment.
    ///
    /// # Errors
    ///
    /// * `NotificationError::Upstream` when the hub answers non-2xx
    /// * `NotificationError::Transport` when the hub cannot be reached in time
    pub async fn send_to_shipment(
        &self,
        shipment_id: &str,
        payload: &impl Serialize,
    ) -> Result<HubResponse, NotificationError> {
        let tag = shipment_tag(shipment_id);
        let body = serde_json::to_vec(payload).map_err(|e| {
            NotificationError::ValidationError(format!("Payload is not serializable: {}", e))
        })?;

        debug!("Sending notification to hub {} with tag {}", self.hub(), tag);

        let response = self
            .client
            .post(self.messages_url())
            .query(&[("api-version", API_VERSION)])
            .header(header::AUTHORIZATION, self.authorization()?)
            .header(header::CONTENT_TYPE, CONTENT_TYPE_JSON_UTF8)
            .header(HEADER_FORMAT, &self.format)
            .header(HEADER_TAGS, &tag)
            .timeout(self.send_timeout)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                error!("Notification hub unreachable: {}", e);
                NotificationError::Transport(e)
            })?;

        let hub_response = HubResponse::read(response).await;
        match hub_response.into_result() {
            Ok(ok) => {
                info!("Notification for {} accepted with status {}", tag, ok.status);
                Ok(ok)
            }
            Err(err) => {
                warn!("Notification for {} rejected: {}", tag, err);
                Err(err)
            }
        }
    }

    /// Creates or replaces the hub installation of a browser subscription.
    ///
    /// # Errors
    ///
    /// Same as [`NotificationHubClient::send_to_shipment`].
    pub async fn register_installation(
        &self,
        installation: &Installation,
    ) -> Result<HubResponse, NotificationError> {
        let url = self
            .connection
            .installation_url(&installation.installation_id);

        debug!(
            "Registering installation {} with {} tags",
            installation.installation_id,
            installation.tags.len()
        );

        let response = self
            .client
            .put(url)
            .query(&[("api-version", API_VERSION)])
            .header(header::AUTHORIZATION, self.authorization()?)
            .header(HEADER_MS_VERSION, API_VERSION)
            .timeout(self.register_timeout)
            .json(installation)
            .send()
            .await
            .map_err(|e| {
                error!("Notification hub unreachable: {}", e);
                NotificationError::Transport(e)
            })?;

        let hub_response = HubResponse::read(response).await;
        hub_response.into_result().inspect_err(|err| {
            warn!(
                "Installation {} rejected: {}",
                installation.installation_id, err
            );
        })
    }
}
