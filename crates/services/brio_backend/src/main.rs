// File: services/brio_backend/src/main.rs
use brio_backend::{build_router, Services};
use brio_common::logging;
use brio_config::load_config;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let level = std::env::var("LOG_LEVEL").unwrap_or_default();
    logging::init_with_level(logging::level_from_str(&level));

    let config = match load_config() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!("Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    #[allow(unused_mut)]
    let mut services = Services::default();

    #[cfg(feature = "tracking")]
    if brio_common::is_tracking_enabled(&config) {
        match brio_db::DbClient::new(&config).await {
            Ok(db_client) => services.erp = Some(db_client),
            Err(e) => error!("ERP connection failed, tracking stays offline: {}", e),
        }
    }

    let app = build_router(config.clone(), services);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            std::process::exit(1);
        }
    };
    info!("Starting server at http://{}", addr);

    if let Err(e) = axum::serve(listener, app.into_make_service()).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
