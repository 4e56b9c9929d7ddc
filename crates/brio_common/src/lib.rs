// --- File: crates/brio_common/src/lib.rs ---

pub mod error; // Error handling
pub mod features; // Feature flag handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // ERP records shared by the db and tracking crates

// Re-export error types and utilities for easier access
pub use error::{
    config_error, database_error, external_service_error, validation_error, BrioError,
    HttpStatusCode,
};

// Re-export HTTP utilities for easier access
pub use http::{
    client::{create_client, HTTP_CLIENT},
    IntoHttpResponse,
};

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, level_from_str};

pub use features::is_feature_enabled;

#[cfg(feature = "tracking")]
pub use features::is_tracking_enabled;

#[cfg(feature = "notifications")]
pub use features::is_notifications_enabled;
