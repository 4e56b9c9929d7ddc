//! Projects a timeline onto the fixed five-stage progress bar

use brio_common::models::ShipmentRecord;
use std::collections::HashSet;

use crate::models::{ProgressStage, StepKey, TimelineStep};

pub const STAGE_TITLES: [&str; 5] = ["Recibido", "En camino", "En destino", "Reparto", "Entregado"];

const NO_SUBTITLE: &str = "-";

/// Builds the progress bar for a shipment.
///
/// The first stage is always done. Every stage before the furthest one reached
/// is done as well, even when the timeline skipped it.
pub fn build_progress(shipment: &ShipmentRecord, timeline: &[TimelineStep]) -> Vec<ProgressStage> {
    let mut stages: Vec<ProgressStage> = STAGE_TITLES
        .iter()
        .map(|title| ProgressStage {
            title: title.to_string(),
            subtitle: NO_SUBTITLE.to_string(),
            done: false,
        })
        .collect();

    stages[0].subtitle = match timeline.iter().find(|step| step.key == StepKey::Inicio) {
        Some(initial) => initial.label.clone(),
        None => shipment
            .status
            .as_deref()
            .map(str::trim)
            .filter(|status| !status.is_empty())
            .unwrap_or(NO_SUBTITLE)
            .to_string(),
    };
    stages[0].done = true;

    let mut furthest = 0;
    let mut seen = HashSet::new();
    for step in timeline {
        let Some(slot) = step.key.slot() else {
            continue;
        };
        if !seen.insert(step.key) {
            continue;
        }
        stages[slot].subtitle = step.label.clone();
        stages[slot].done = true;
        furthest = furthest.max(slot);
    }

    for stage in stages.iter_mut().take(furthest) {
        stage.done = true;
    }

    stages
}
