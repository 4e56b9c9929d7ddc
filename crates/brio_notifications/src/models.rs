//! Request and response bodies for the notification endpoints

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::NotificationError;

pub const DEFAULT_TITLE: &str = "Actualización";
pub const DEFAULT_BODY: &str = "Tu envío cambió de estado";

/// Length of the installation id taken from the end of a push endpoint
pub const INSTALLATION_ID_LEN: usize = 32;

/// Notification shown by the service worker
///
/// Fields other than `title` and `body` are passed through to the hub untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NotificationPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(flatten)]
    #[cfg_attr(feature = "openapi", schema(ignore))]
    pub extra: Map<String, Value>,
}

impl NotificationPayload {
    /// The "status changed" notification sent when the caller gives none
    pub fn default_update() -> Self {
        Self {
            title: Some(DEFAULT_TITLE.to_string()),
            body: Some(DEFAULT_BODY.to_string()),
            extra: Map::new(),
        }
    }

    pub fn into_value(self) -> Value {
        let mut map = self.extra;
        if let Some(title) = self.title {
            map.insert("title".to_string(), Value::String(title));
        }
        if let Some(body) = self.body {
            map.insert("body".to_string(), Value::String(body));
        }
        Value::Object(map)
    }
}

/// Body of `POST /notifications/send`
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SendRequest {
    /// Shipment number, as a string or a number
    #[serde(default, deserialize_with = "lenient_id")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<String>, example = "42"))]
    pub envio_id: Option<String>,
    /// Relayed as given when present and not empty, whatever its shape
    #[serde(default)]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<NotificationPayload>))]
    pub payload: Option<Value>,
}

impl SendRequest {
    /// Parses a request body, treating unreadable JSON as an empty request.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_else(|e| {
            tracing::debug!("Unreadable send request body, treating as empty: {}", e);
            Self::default()
        })
    }

    /// The trimmed shipment number
    ///
    /// # Errors
    ///
    /// `NotificationError::ValidationError` when it is missing or blank.
    pub fn shipment_id(&self) -> Result<&str, NotificationError> {
        self.envio_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| NotificationError::ValidationError("envio_id es requerido".to_string()))
    }

    /// The caller's payload, or the default update when none (or an empty one) was given
    pub fn payload_or_default(&self) -> Value {
        match &self.payload {
            Some(payload) if is_present(payload) => payload.clone(),
            _ => NotificationPayload::default_update().into_value(),
        }
    }
}

/// `null`, `false`, `0`, `""`, `[]` and `{}` count as absent
fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Response of `POST /notifications/send`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SendResponse {
    pub status: u16,
    pub reason: String,
    /// Upstream body, at most 500 characters
    pub text: String,
    pub hub: String,
    /// URL the notification was posted to
    pub resource: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PushKeys {
    pub p256dh: Option<String>,
    pub auth: Option<String>,
}

/// A browser `PushSubscription` as serialized by `subscription.toJSON()`
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PushSubscription {
    pub endpoint: Option<String>,
    pub keys: Option<PushKeys>,
}

/// Body of `POST /notifications/subscribe`
#[derive(Debug, Clone, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SubscribeRequest {
    /// A malformed subscription is kept as absent
    #[serde(default, deserialize_with = "lenient_subscription")]
    pub subscription: Option<PushSubscription>,
    /// A list of tags or a single tag; other values are ignored
    #[serde(default, deserialize_with = "lenient_tags")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Vec<String>>))]
    pub tags: Option<Vec<String>>,
}

impl SubscribeRequest {
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Builds the hub installation for this subscription
    ///
    /// # Errors
    ///
    /// `NotificationError::ValidationError` unless endpoint, `p256dh` and `auth`
    /// are all present.
    pub fn into_installation(self) -> Result<Installation, NotificationError> {
        let incomplete = || NotificationError::ValidationError("Suscripción incompleta".to_string());
        let non_blank = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

        let subscription = self.subscription.ok_or_else(incomplete)?;
        let keys = subscription.keys.unwrap_or_default();
        let endpoint = non_blank(subscription.endpoint).ok_or_else(incomplete)?;
        let p256dh = non_blank(keys.p256dh).ok_or_else(incomplete)?;
        let auth = non_blank(keys.auth).ok_or_else(incomplete)?;

        Ok(Installation {
            installation_id: installation_id_for(&endpoint),
            platform: "browser".to_string(),
            push_channel: PushChannel {
                endpoint,
                p256dh,
                auth,
            },
            tags: self.tags.unwrap_or_default(),
        })
    }
}

fn lenient_subscription<'de, D>(deserializer: D) -> Result<Option<PushSubscription>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value)
        .inspect_err(|e| tracing::debug!("Unreadable push subscription: {}", e))
        .ok())
}

fn lenient_tags<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(tag) => Some(vec![tag]),
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(tag) => Some(tag),
                    _ => None,
                })
                .collect(),
        ),
        _ => None,
    })
}

/// Last 32 characters of the push endpoint
pub fn installation_id_for(endpoint: &str) -> String {
    let chars: Vec<char> = endpoint.chars().collect();
    let start = chars.len().saturating_sub(INSTALLATION_ID_LEN);
    chars[start..].iter().collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PushChannel {
    pub endpoint: String,
    pub p256dh: String,
    pub auth: String,
}

/// Hub installation for a browser push subscription
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Installation {
    pub installation_id: String,
    pub platform: String,
    pub push_channel: PushChannel,
    pub tags: Vec<String>,
}

/// Response of `POST /notifications/subscribe`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SubscribeResponse {
    pub status: u16,
    pub text: String,
}
