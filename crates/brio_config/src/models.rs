// --- File: crates/brio_config/src/models.rs ---

use serde::{Deserialize, Serialize};

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

// --- ERP Database Config ---
// Read-only connection to the logistics ERP, separate from any application database.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ErpDatabaseConfig {
    #[serde(default)]
    pub url: Option<String>, // e.g. loaded via BRIO__ERP__URL or the ERP_URL secret
    #[serde(default)]
    pub max_connections: Option<u32>,
    #[serde(default)]
    pub acquire_timeout_secs: Option<u64>,
}

/// How the `SharedAccessKey` of the hub connection string is turned into HMAC key bytes.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum KeyEncoding {
    /// The key string is used as-is (UTF-8 bytes).
    #[default]
    Raw,
    /// The key string is base64 and is decoded first.
    Base64,
}

// --- Notification Hub Config ---
// The connection string is a secret and normally comes from NOTIFICATION_HUB_CONNECTION_STRING.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct NotificationHubConfig {
    #[serde(default)]
    pub connection_string: Option<String>,
    /// Used when the connection string has no `EntityPath`.
    #[serde(default)]
    pub hub_name: Option<String>,
    #[serde(default)]
    pub token_ttl_secs: Option<u64>,
    #[serde(default)]
    pub key_encoding: KeyEncoding,
    /// Value of the `ServiceBusNotification-Format` header, `webpush` when unset.
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub send_timeout_secs: Option<u64>,
    #[serde(default)]
    pub register_timeout_secs: Option<u64>,
}

// --- Web Push Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct WebPushConfig {
    #[serde(default)]
    pub vapid_public_key: Option<String>,
}

// --- Static Files Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct StaticFilesConfig {
    pub dir: String,
    pub service_worker: String,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            dir: "static".to_string(),
            service_worker: "static/service-worker.js".to_string(),
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    // Server config is mandatory
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_tracking: bool,
    #[serde(default)]
    pub use_notifications: bool,

    // --- Optional Feature Configurations ---
    #[serde(default)]
    pub erp: Option<ErpDatabaseConfig>,
    #[serde(default)]
    pub notification_hub: Option<NotificationHubConfig>,
    #[serde(default)]
    pub web_push: Option<WebPushConfig>,
    #[serde(default)]
    pub static_files: Option<StaticFilesConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            use_tracking: false,
            use_notifications: false,
            erp: None,
            notification_hub: None,
            web_push: None,
            static_files: None,
        }
    }
}
