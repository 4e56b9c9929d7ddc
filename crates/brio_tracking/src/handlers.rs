//! HTTP handlers for shipment tracking
//!
//! The lookup handler answers with a `TrackingView` in every non-error case so
//! the page can render the message next to the search box.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use brio_db::ShipmentRepository;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use crate::service::{LookupOutcome, TrackingService};

/// Shared state for tracking handlers
pub struct TrackingState<R> {
    pub service: TrackingService<R>,
}

/// Query string of `GET /tracking`
#[derive(Debug, Default, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams))]
pub struct TrackingQuery {
    /// Shipment number, digits only
    #[serde(default)]
    pub q: String,
}

/// Looks up a shipment and returns its timeline and progress bar
///
/// # Responses
///
/// - 200 OK: shipment found, not found (with `msg`), or empty query
/// - 400 Bad Request: the shipment number is not numeric
/// - 500 Internal Server Error: the ERP could not be queried
pub async fn tracking_handler<R>(
    State(state): State<Arc<TrackingState<R>>>,
    Query(query): Query<TrackingQuery>,
) -> Response
where
    R: ShipmentRepository + Send + Sync + 'static,
{
    debug!("Tracking lookup for {:?}", query.q);

    match state.service.lookup(&query.q).await {
        Ok(view) => {
            let status = match view.outcome {
                LookupOutcome::InvalidId => StatusCode::BAD_REQUEST,
                _ => StatusCode::OK,
            };
            (status, Json(view)).into_response()
        }
        Err(err) => err.into_response(),
    }
}
