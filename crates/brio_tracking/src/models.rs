//! Types derived from a shipment and its movements
//!
//! Nothing here is stored; timeline steps and progress stages are rebuilt on
//! every lookup.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a milestone in a shipment's life.
///
/// `Reparto` and `Entrega` have a slot in the progress bar but no rule emits
/// them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StepKey {
    Inicio,
    Clasificacion,
    EnCamino,
    Destino,
    Reparto,
    Entrega,
}

impl StepKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKey::Inicio => "INICIO",
            StepKey::Clasificacion => "CLASIFICACION",
            StepKey::EnCamino => "EN_CAMINO",
            StepKey::Destino => "DESTINO",
            StepKey::Reparto => "REPARTO",
            StepKey::Entrega => "ENTREGA",
        }
    }

    /// Progress bar slot this key lands in. `Inicio` has none; it only feeds
    /// the subtitle of the first slot.
    pub fn slot(&self) -> Option<usize> {
        match self {
            StepKey::Inicio => None,
            StepKey::Clasificacion => Some(0),
            StepKey::EnCamino => Some(1),
            StepKey::Destino => Some(2),
            StepKey::Reparto => Some(3),
            StepKey::Entrega => Some(4),
        }
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A human-readable milestone shown on the tracking page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct TimelineStep {
    pub key: StepKey,
    pub label: String,
    /// `YYYY-MM-DD HH:MM`, absent when the source had no timestamp
    pub when: Option<String>,
    /// Always true: a step only exists once it happened
    pub done: bool,
    pub detail: String,
}

impl TimelineStep {
    pub fn new(key: StepKey, label: &str, when: Option<String>, detail: String) -> Self {
        Self {
            key,
            label: label.to_string(),
            when,
            done: true,
            detail,
        }
    }
}

/// One of the five fixed stages of the horizontal progress bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ProgressStage {
    pub title: String,
    pub subtitle: String,
    pub done: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_key_serializes_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&StepKey::EnCamino).unwrap(),
            "\"EN_CAMINO\""
        );
        assert_eq!(StepKey::Clasificacion.to_string(), "CLASIFICACION");
        let parsed: StepKey = serde_json::from_str("\"INICIO\"").unwrap();
        assert_eq!(parsed, StepKey::Inicio);
    }

    #[test]
    fn test_slots() {
        assert_eq!(StepKey::Inicio.slot(), None);
        assert_eq!(StepKey::Clasificacion.slot(), Some(0));
        assert_eq!(StepKey::Destino.slot(), Some(2));
        assert_eq!(StepKey::Entrega.slot(), Some(4));
    }
}
