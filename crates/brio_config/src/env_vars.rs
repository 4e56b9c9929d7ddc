//! Environment variable handling for the Brio service.
//!
//! Configuration values can be overridden with `BRIO__SECTION__KEY` variables
//! (handled by the `config` crate). Secrets are referenced from the config files
//! with the `"secret_from_env"` marker and resolved here, trying
//! `BRIO_SECRET_SECTION_KEY` first and the bare `SECTION_KEY` second.

use serde_json::Value;
use std::env;
use tracing::warn;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "BRIO";

/// The prefix for secret environment variables
pub const SECRET_PREFIX: &str = "BRIO_SECRET";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// The separator for secret environment variables
pub const SECRET_SEPARATOR: &str = "_";

/// Marker placed in config files for values that must come from the environment
pub const SECRET_MARKER: &str = "secret_from_env";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// `"server.port"` becomes `"BRIO__SERVER__PORT"`.
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to an environment variable name
///
/// `"notification_hub.connection_string"` becomes
/// `"BRIO_SECRET_NOTIFICATION_HUB_CONNECTION_STRING"`.
pub fn secret_path_to_env_var(path: &str) -> String {
    let path = path.replace('.', SECRET_SEPARATOR);
    format!("{}{}{}", SECRET_PREFIX, SECRET_SEPARATOR, path).to_uppercase()
}

/// Convert a secret path to its short environment variable name
///
/// `"notification_hub.connection_string"` becomes `"NOTIFICATION_HUB_CONNECTION_STRING"`.
pub fn short_secret_path_to_env_var(path: &str) -> String {
    path.replace('.', SECRET_SEPARATOR).to_uppercase()
}

/// Get an environment variable for a secret path, long name first.
pub fn get_secret_env_var(path: &str) -> Option<String> {
    env::var(secret_path_to_env_var(path))
        .or_else(|_| env::var(short_secret_path_to_env_var(path)))
        .ok()
        .filter(|v| !v.trim().is_empty())
}

/// Replace every `"secret_from_env"` marker in `value` with its environment value.
///
/// A marker whose variable is not set becomes `null`, so optional fields read as
/// absent instead of carrying the marker text. Returns the paths left unresolved.
pub fn inject_env_secrets(value: &mut Value) -> Vec<String> {
    fn walk(path: &mut Vec<String>, obj: &mut Value, missing: &mut Vec<String>) {
        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    path.push(k.to_string());
                    walk(path, v, missing);
                    path.pop();
                }
            }
            Value::String(s) if s == SECRET_MARKER => {
                let path_str = path.join(".");
                match get_secret_env_var(&path_str) {
                    Some(env_val) => *obj = Value::String(env_val),
                    None => {
                        warn!(
                            "env var {} not found for secret_from_env",
                            short_secret_path_to_env_var(&path_str)
                        );
                        *obj = Value::Null;
                        missing.push(path_str);
                    }
                }
            }
            _ => {}
        }
    }

    let mut missing = Vec::new();
    walk(&mut Vec::new(), value, &mut missing);
    missing
}
