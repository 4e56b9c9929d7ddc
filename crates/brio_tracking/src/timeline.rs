//! Builds the deduplicated timeline shown for a shipment

use brio_common::models::{MovementEvent, ShipmentRecord};
use std::collections::HashSet;

use crate::models::{StepKey, TimelineStep};
use crate::rules::apply_rules;

/// The synthetic first milestone: the shipment was received at its origin.
pub fn initial_step(shipment: &ShipmentRecord) -> TimelineStep {
    let date = shipment.received_date.as_deref().unwrap_or("");
    let time = shipment.received_time.as_deref().unwrap_or("");
    let when = format!("{} {}", date, time).trim().to_string();
    let when = (!when.is_empty()).then_some(when);

    let origin = shipment
        .origin_branch_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .or_else(|| shipment.origin_branch_id.map(|id| id.to_string()))
        .unwrap_or_else(|| "-".to_string());

    TimelineStep::new(
        StepKey::Inicio,
        "Recibimos tu envío",
        when,
        format!("Tu envío fue recibido en la sucursal {}", origin),
    )
}

/// Classifies `movements` (newest first) into a timeline.
///
/// Each key appears at most once and comes from the newest movement that
/// produced it. The `INICIO` step is always appended last.
pub fn build_timeline(movements: &[MovementEvent], shipment: &ShipmentRecord) -> Vec<TimelineStep> {
    let mut seen = HashSet::new();
    let mut timeline: Vec<TimelineStep> = movements
        .iter()
        .filter_map(|movement| apply_rules(movement, shipment))
        .filter(|step| seen.insert(step.key))
        .collect();

    timeline.push(initial_step(shipment));
    timeline
}

/// The most recent milestone, i.e. the head of the timeline
pub fn current_step(timeline: &[TimelineStep]) -> Option<&TimelineStep> {
    timeline.first()
}
