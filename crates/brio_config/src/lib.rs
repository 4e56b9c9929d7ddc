//! Configuration for the Brio tracking service.
//!
//! Sources are layered in this order, later ones winning:
//!
//! 1. `{CONFIG_DIR}/default.toml`
//! 2. `{CONFIG_DIR}/{RUN_ENV}.toml`
//! 3. `BRIO__SECTION__KEY` environment variables
//!
//! String values equal to `"secret_from_env"` are then replaced from the
//! environment (see [`env_vars`]).

use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use serde_json::Value;
use std::env;
use std::path::Path;
use tracing::{debug, info};

pub mod env_vars;
pub mod models;

pub use models::*;

/// Loads the configuration from `CONFIG_DIR` (default `config`) for `RUN_ENV` (default `debug`).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir = env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    load_config_from(Path::new(&config_dir), &run_env)
}

/// Loads the configuration from an explicit directory and run environment.
pub fn load_config_from(config_dir: &Path, run_env: &str) -> Result<AppConfig, ConfigError> {
    let prefix = env_vars::get_config_prefix();
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);

    debug!(
        "loading config from {} and {}",
        default_path.display(),
        env_path.display()
    );

    let builder = Config::builder()
        .add_source(File::from(default_path).required(false))
        .add_source(File::from(env_path).required(false))
        .add_source(
            Environment::with_prefix(&prefix)
                .separator(env_vars::CONFIG_SEPARATOR)
                .try_parsing(true),
        );

    let raw: Value = builder.build()?.try_deserialize()?;
    let config = apply_env_overrides_from_marker(raw)?;

    info!(
        "Configuration loaded (run_env={}, tracking={}, notifications={})",
        run_env, config.use_tracking, config.use_notifications
    );
    Ok(config)
}

/// Resolves `"secret_from_env"` markers and deserializes the result.
pub fn apply_env_overrides_from_marker(mut raw: Value) -> Result<AppConfig, ConfigError> {
    env_vars::inject_env_secrets(&mut raw);
    serde_json::from_value(raw)
        .map_err(|err| ConfigError::Message(format!("failed to parse config: {err}")))
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Loads the dotenv file into the process environment, once.
///
/// The file is `DOTENV_OVERRIDE` when set, otherwise a first CLI argument that
/// starts with `.env`, otherwise `.env`. Returns the path that was used.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path_override = env::var("DOTENV_OVERRIDE").ok();
    let dotenv_path_arg = env::args().nth(1).filter(|s| s.starts_with(".env"));

    let dotenv_path = dotenv_path_override
        .or(dotenv_path_arg)
        .unwrap_or_else(|| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_config_from_layers_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
use_tracking = true

[server]
host = "0.0.0.0"
port = 8000

[notification_hub]
hub_name = "envios"
connection_string = "secret_from_env"
"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("layered.toml"),
            r#"
[server]
host = "0.0.0.0"
port = 9000
"#,
        )
        .unwrap();

        let config = load_config_from(dir.path(), "layered").unwrap();

        assert_eq!(config.server.port, 9000);
        assert!(config.use_tracking);
        assert!(!config.use_notifications);
        let hub = config.notification_hub.unwrap();
        assert_eq!(hub.hub_name.as_deref(), Some("envios"));
        assert_eq!(hub.key_encoding, KeyEncoding::Raw);
    }

    #[test]
    fn test_missing_server_section_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "use_tracking = true\n").unwrap();

        assert!(load_config_from(dir.path(), "nothing").is_err());
    }
}
