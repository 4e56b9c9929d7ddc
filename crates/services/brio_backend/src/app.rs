use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use brio_config::AppConfig;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::{info, warn};

#[cfg(feature = "tracking")]
use brio_db::DbClient;

use crate::service_worker::{service_worker_handler, ServiceWorkerState};

pub const WELCOME: &str = "Welcome to the Brio tracking API!";

/// Connections opened at startup and handed to the routers
#[derive(Debug, Clone, Default)]
pub struct Services {
    /// ERP pool; tracking is not mounted without it
    #[cfg(feature = "tracking")]
    pub erp: Option<DbClient>,
}

/// What `/health` checks besides the process being up
#[derive(Debug, Clone, Default)]
struct HealthState {
    /// Set only when tracking is mounted on this pool
    #[cfg(feature = "tracking")]
    erp: Option<DbClient>,
}

async fn health(State(state): State<Arc<HealthState>>) -> Response {
    #[cfg(feature = "tracking")]
    if let Some(erp) = &state.erp {
        if !erp.is_healthy().await {
            warn!("Health check failed: ERP is not answering");
            return (StatusCode::SERVICE_UNAVAILABLE, "erp unavailable").into_response();
        }
    }
    #[cfg(not(feature = "tracking"))]
    let _ = state;

    "ok".into_response()
}

/// Builds the complete application router.
///
/// Feature routers are mounted when their cargo feature is compiled in and
/// their runtime flag is set. Tracking additionally needs a connected ERP.
pub fn build_router(config: Arc<AppConfig>, services: Services) -> Router {
    let static_files = config.static_files.clone().unwrap_or_default();

    #[allow(unused_mut)] // only mutated when a feature router is compiled in
    let mut health_state = HealthState::default();
    let mut app = Router::new()
        .route("/", get(|| async { WELCOME }))
        .merge(
            Router::new()
                .route("/service-worker.js", get(service_worker_handler))
                .with_state(Arc::new(ServiceWorkerState {
                    path: PathBuf::from(&static_files.service_worker),
                })),
        );

    #[cfg(feature = "tracking")]
    {
        if brio_common::is_tracking_enabled(&config) {
            match services.erp {
                Some(db_client) => {
                    health_state.erp = Some(db_client.clone());
                    app = app.merge(brio_tracking::routes(db_client));
                }
                None => warn!("Tracking is enabled but the ERP is not connected, /tracking not mounted"),
            }
        } else {
            info!("Tracking disabled by configuration");
        }
    }
    #[cfg(not(feature = "tracking"))]
    let _ = services;

    #[cfg(feature = "notifications")]
    {
        if brio_common::is_notifications_enabled(&config) {
            app = app.merge(brio_notifications::routes(config.clone()));
        } else {
            info!("Notifications disabled by configuration");
        }
    }

    #[cfg(feature = "openapi")]
    {
        app = app.merge(swagger_ui());
    }

    app = app.merge(
        Router::new()
            .route("/health", get(health))
            .with_state(Arc::new(health_state)),
    );

    app.nest_service("/static", ServeDir::new(&static_files.dir))
        .layer(TraceLayer::new_for_http())
}

#[cfg(feature = "openapi")]
fn swagger_ui() -> utoipa_swagger_ui::SwaggerUi {
    #[cfg(feature = "notifications")]
    use brio_notifications::openapi::NotificationsApiDoc;
    #[cfg(feature = "tracking")]
    use brio_tracking::openapi::TrackingApiDoc;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "Brio API",
            version = "0.1.0",
            description = "Shipment tracking and push notification relay",
            license(name = "MIT", url = "https://opensource.org/licenses/MIT")
        ),
        components(),
        tags((name = "Brio", description = "Core service endpoints")),
    )]
    struct ApiDoc;

    #[allow(unused_mut)] // for the features it needs to be mutable
    let mut openapi_doc = ApiDoc::openapi();
    #[cfg(feature = "tracking")]
    openapi_doc.merge(TrackingApiDoc::openapi());
    #[cfg(feature = "notifications")]
    openapi_doc.merge(NotificationsApiDoc::openapi());

    info!("Adding Swagger UI at /api/docs");
    SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc)
}
