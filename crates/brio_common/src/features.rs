//! Feature flag handling for the Brio service.
//!
//! ## Available Features
//!
//! - `openapi`: Enables OpenAPI documentation generation
//! - `tracking`: Enables the shipment tracking endpoints
//! - `notifications`: Enables the notification hub relay
//!
//! Cargo features decide what is compiled; the `use_*` flags in the
//! configuration decide what is mounted at runtime.

/// Check if a feature is enabled at runtime based on configuration.
///
/// A feature is enabled when its `use_*` flag is set and its configuration
/// section is present.
pub fn is_feature_enabled<T>(use_feature: bool, feature_config: Option<&T>) -> bool {
    use_feature && feature_config.is_some()
}

/// Check if shipment tracking is enabled at runtime.
#[cfg(feature = "tracking")]
pub fn is_tracking_enabled(config: &brio_config::AppConfig) -> bool {
    is_feature_enabled(config.use_tracking, config.erp.as_ref())
}

/// Check if the notification relay is enabled at runtime.
///
/// The hub section may be absent; the routes then answer with configuration errors.
#[cfg(feature = "notifications")]
pub fn is_notifications_enabled(config: &brio_config::AppConfig) -> bool {
    config.use_notifications
}

#[cfg(test)]
mod tests {
    use super::*;
    use brio_config::AppConfig;

    #[test]
    fn test_is_feature_enabled() {
        assert!(is_feature_enabled(true, Some(&())));
        assert!(!is_feature_enabled(true, None::<&()>));
        assert!(!is_feature_enabled(false, Some(&())));
    }

    #[test]
    fn test_default_config_has_features_off() {
        let config = AppConfig::default();
        assert!(!is_feature_enabled(config.use_tracking, config.erp.as_ref()));
    }
}
