#[cfg(test)]
mod tests {
    use crate::models::StepKey;
    use crate::test_support::{movement, shipment_123, DESTINATION, ORIGIN};
    use crate::timeline::{build_timeline, current_step, initial_step};
    use brio_common::models::ShipmentRecord;

    fn keys(steps: &[crate::models::TimelineStep]) -> Vec<StepKey> {
        steps.iter().map(|s| s.key).collect()
    }

    #[test]
    fn test_travel_then_classification() {
        // Newest first: travelled at t=2, classified at t=1
        let movements = vec![
            movement(ORIGIN, "V", "2025-03-01 10:30"),
            movement(ORIGIN, "C", "2025-03-01 09:00"),
        ];
        let timeline = build_timeline(&movements, &shipment_123());

        assert_eq!(
            keys(&timeline),
            vec![StepKey::EnCamino, StepKey::Clasificacion, StepKey::Inicio]
        );
        assert_eq!(current_step(&timeline).unwrap().key.as_str(), "EN_CAMINO");
    }

    #[test]
    fn test_no_movements_yields_only_initial_step() {
        let timeline = build_timeline(&[], &shipment_123());
        assert_eq!(keys(&timeline), vec![StepKey::Inicio]);
        assert_eq!(current_step(&timeline).unwrap().key, StepKey::Inicio);
    }

    #[test]
    fn test_newest_movement_wins_per_key() {
        let movements = vec![
            movement(ORIGIN, "C", "2025-03-01 11:00"),
            movement(ORIGIN, "C", "2025-03-01 09:00"),
            movement(ORIGIN, "c", "2025-03-01 08:30"),
        ];
        let timeline = build_timeline(&movements, &shipment_123());

        assert_eq!(keys(&timeline), vec![StepKey::Clasificacion, StepKey::Inicio]);
        assert_eq!(timeline[0].when.as_deref(), Some("2025-03-01 11:00"));
    }

    #[test]
    fn test_full_journey() {
        let movements = vec![
            movement(DESTINATION, "D", "2025-03-02 09:00"),
            movement(ORIGIN, "V", "2025-03-01 10:30"),
            movement(ORIGIN, "C", "2025-03-01 09:00"),
        ];
        let timeline = build_timeline(&movements, &shipment_123());
        assert_eq!(
            keys(&timeline),
            vec![
                StepKey::Destino,
                StepKey::EnCamino,
                StepKey::Clasificacion,
                StepKey::Inicio
            ]
        );
    }

    #[test]
    fn test_unmatched_movements_are_ignored() {
        let mut malformed = movement(ORIGIN, "C", "2025-03-01 12:00");
        malformed.current_branch_id = None;
        let movements = vec![
            malformed,
            movement(99, "V", "2025-03-01 11:00"),
            movement(ORIGIN, "Z", "2025-03-01 10:00"),
        ];
        let timeline = build_timeline(&movements, &shipment_123());
        assert_eq!(keys(&timeline), vec![StepKey::Inicio]);
    }

    #[test]
    fn test_initial_step_fields() {
        let step = initial_step(&shipment_123());
        assert_eq!(step.key, StepKey::Inicio);
        assert_eq!(step.label, "Recibimos tu envío");
        assert_eq!(step.when.as_deref(), Some("2025-03-01 08:05"));
        assert_eq!(step.detail, "Tu envío fue recibido en la sucursal Córdoba");
        assert!(step.done);
    }

    #[test]
    fn test_initial_step_fallbacks() {
        let shipment = ShipmentRecord {
            id: 7,
            origin_branch_id: Some(4),
            received_date: Some("2025-03-01".to_string()),
            ..Default::default()
        };
        let step = initial_step(&shipment);
        assert_eq!(step.when.as_deref(), Some("2025-03-01"));
        assert_eq!(step.detail, "Tu envío fue recibido en la sucursal 4");

        let bare = ShipmentRecord {
            id: 8,
            ..Default::default()
        };
        let step = initial_step(&bare);
        assert_eq!(step.when, None);
        assert_eq!(step.detail, "Tu envío fue recibido en la sucursal -");
    }
}
