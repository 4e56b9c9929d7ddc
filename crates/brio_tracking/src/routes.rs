use axum::{routing::get, Router};
use brio_db::{DbClient, ShipmentRepository, SqlShipmentRepository};
use std::sync::Arc;
use tracing::info;

use crate::handlers::{tracking_handler, TrackingState};
use crate::service::TrackingService;

/// Create tracking routes backed by the ERP
///
/// # Arguments
///
/// * `db_client` - Connected ERP client, shared with the rest of the backend
pub fn routes(db_client: DbClient) -> Router {
    routes_with_repository(SqlShipmentRepository::new(db_client))
}

/// Create tracking routes over any shipment repository
pub fn routes_with_repository<R>(repository: R) -> Router
where
    R: ShipmentRepository + Send + Sync + 'static,
{
    let state = Arc::new(TrackingState {
        service: TrackingService::new(repository),
    });

    info!("Tracking routes initialized");

    Router::new()
        .route("/tracking", get(tracking_handler::<R>))
        .with_state(state)
}
