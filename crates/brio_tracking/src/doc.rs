#![allow(dead_code)]
use utoipa::OpenApi;

use brio_common::models::{Branch, Customer, MovementEvent, ShipmentRecord};

use crate::handlers::TrackingQuery;
use crate::models::{ProgressStage, StepKey, TimelineStep};
use crate::service::{ShipmentBranches, ShipmentCustomers, TrackingView};

#[utoipa::path(
    get,
    path = "/tracking",
    params(TrackingQuery),
    responses(
        (status = 200, description = "Lookup finished (found, not found or empty query)", body = TrackingView,
         example = json!({
             "q": "123",
             "shipment": { "id": 123, "status": "En viaje", "origin_branch_id": 1, "destination_branch_id": 2 },
             "movements": [],
             "timeline": [
                 { "key": "EN_CAMINO", "label": "En camino a destino", "when": "2025-03-01 10:30",
                   "done": true, "detail": "En viaje hacia la sucursal Rosario" },
                 { "key": "INICIO", "label": "Recibimos tu envío", "when": "2025-03-01 08:05",
                   "done": true, "detail": "Tu envío fue recibido en la sucursal Córdoba" }
             ],
             "progress_steps": [
                 { "title": "Recibido", "subtitle": "Recibimos tu envío", "done": true },
                 { "title": "En camino", "subtitle": "En camino a destino", "done": true },
                 { "title": "En destino", "subtitle": "-", "done": false },
                 { "title": "Reparto", "subtitle": "-", "done": false },
                 { "title": "Entregado", "subtitle": "-", "done": false }
             ],
             "current_step": { "key": "EN_CAMINO", "label": "En camino a destino", "when": "2025-03-01 10:30",
                               "done": true, "detail": "En viaje hacia la sucursal Rosario" },
             "customers": { "origin": null, "destination": null },
             "branches": { "origin": null, "destination": null, "issuing": null },
             "msg": ""
         })
        ),
        (status = 400, description = "Shipment number is not numeric", body = TrackingView,
         example = json!({
             "q": "abc", "shipment": null, "movements": [], "timeline": [], "progress_steps": [],
             "current_step": null, "customers": null, "branches": null,
             "msg": "El número de envío debe ser numérico."
         })
        ),
        (status = 500, description = "ERP query failed")
    ),
    tag = "Tracking"
)]
fn doc_tracking_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_tracking_handler),
    components(
        schemas(
            TrackingView,
            TimelineStep,
            StepKey,
            ProgressStage,
            ShipmentCustomers,
            ShipmentBranches,
            ShipmentRecord,
            MovementEvent,
            Customer,
            Branch,
        )
    ),
    tags(
        (name = "Tracking", description = "Shipment tracking API")
    )
)]
pub struct TrackingApiDoc;
