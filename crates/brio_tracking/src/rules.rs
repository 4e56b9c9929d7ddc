//! Business rules that turn ERP movements into timeline steps
//!
//! Rules are plain functions evaluated in order; the first one that returns a
//! step wins. A rule never panics on dirty data: a missing id simply does not
//! match.

use brio_common::models::{MovementEvent, ShipmentRecord};
use tracing::{debug, warn};

use crate::models::{StepKey, TimelineStep};

/// A classification rule
pub type Rule = fn(&MovementEvent, &ShipmentRecord) -> Option<TimelineStep>;

/// Registered rules, in evaluation order
pub const RULES: [Rule; 3] = [rule_classification, rule_in_transit, rule_arrived];

const OP_CLASSIFY: &str = "C";
const OP_TRAVEL: &str = "V";
const OP_ARRIVE: &str = "D";

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Both ids present and equal. Two missing ids are not the same branch.
fn same_branch(a: Option<i64>, b: Option<i64>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

/// Destination shown in step details
///
/// Movement destination name, then the shipment's destination name, then the
/// shipment's destination id, then `-`.
pub fn destination_label(movement: &MovementEvent, shipment: &ShipmentRecord) -> String {
    non_blank(movement.destination_branch_name.as_ref())
        .or_else(|| non_blank(shipment.destination_branch_name.as_ref()))
        .map(str::to_string)
        .or_else(|| shipment.destination_branch_id.map(|id| id.to_string()))
        .unwrap_or_else(|| "-".to_string())
}

/// Parcel is being sorted at the origin branch
pub fn rule_classification(
    movement: &MovementEvent,
    shipment: &ShipmentRecord,
) -> Option<TimelineStep> {
    if !same_branch(movement.current_branch_id, shipment.origin_branch_id)
        || movement.operation_code().as_deref() != Some(OP_CLASSIFY)
    {
        return None;
    }
    Some(TimelineStep::new(
        StepKey::Clasificacion,
        "En Proceso de Clasificación",
        movement.updated_at.clone(),
        format!(
            "Tu envío está en preparación para ser enviado a la sucursal de {}",
            destination_label(movement, shipment)
        ),
    ))
}

/// Parcel left the origin branch
pub fn rule_in_transit(movement: &MovementEvent, shipment: &ShipmentRecord) -> Option<TimelineStep> {
    if !same_branch(movement.current_branch_id, shipment.origin_branch_id)
        || movement.operation_code().as_deref() != Some(OP_TRAVEL)
    {
        return None;
    }
    Some(TimelineStep::new(
        StepKey::EnCamino,
        "En camino a destino",
        movement.updated_at.clone(),
        format!(
            "En viaje hacia la sucursal {}",
            destination_label(movement, shipment)
        ),
    ))
}

/// Parcel was received at the destination branch
pub fn rule_arrived(movement: &MovementEvent, shipment: &ShipmentRecord) -> Option<TimelineStep> {
    if !same_branch(movement.current_branch_id, shipment.destination_branch_id)
        || movement.operation_code().as_deref() != Some(OP_ARRIVE)
    {
        return None;
    }
    Some(TimelineStep::new(
        StepKey::Destino,
        "Recibido en Suc. Destino",
        movement.updated_at.clone(),
        format!(
            "Tu envío está en el centro de distribución {}",
            destination_label(movement, shipment)
        ),
    ))
}

/// Runs the rules over one movement and returns the first step produced.
///
/// Movements that cannot be classified because a field the rules compare is
/// missing are logged and skipped.
pub fn apply_rules(movement: &MovementEvent, shipment: &ShipmentRecord) -> Option<TimelineStep> {
    let Some(operation) = movement.operation_code() else {
        warn!(
            shipment_id = movement.shipment_id,
            updated_at = ?movement.updated_at,
            "Skipping movement without operation code"
        );
        return None;
    };
    if movement.current_branch_id.is_none() {
        warn!(
            shipment_id = movement.shipment_id,
            updated_at = ?movement.updated_at,
            operation = %operation,
            "Skipping movement without current branch"
        );
        return None;
    }

    let reference_branch = match operation.as_str() {
        OP_CLASSIFY | OP_TRAVEL => Some(("origin", shipment.origin_branch_id)),
        OP_ARRIVE => Some(("destination", shipment.destination_branch_id)),
        _ => None,
    };
    if let Some((which, None)) = reference_branch {
        warn!(
            shipment_id = shipment.id,
            operation = %operation,
            "Shipment has no {} branch, movement cannot be classified", which
        );
        return None;
    }

    let step = RULES.iter().find_map(|rule| rule(movement, shipment));
    if step.is_none() {
        debug!(
            shipment_id = movement.shipment_id,
            operation = %operation,
            current_branch_id = ?movement.current_branch_id,
            "No rule matched movement"
        );
    }
    step
}
