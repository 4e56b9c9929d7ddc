#[cfg(test)]
mod tests {
    use crate::models::{StepKey, TimelineStep};
    use crate::progress::{build_progress, STAGE_TITLES};
    use crate::test_support::{movement, shipment_123, DESTINATION, ORIGIN};
    use crate::timeline::build_timeline;

    fn done_flags(shipment_movements: &[brio_common::models::MovementEvent]) -> Vec<bool> {
        let shipment = shipment_123();
        let timeline = build_timeline(shipment_movements, &shipment);
        build_progress(&shipment, &timeline)
            .iter()
            .map(|stage| stage.done)
            .collect()
    }

    #[test]
    fn test_no_movements_only_first_stage_done() {
        let shipment = shipment_123();
        let timeline = build_timeline(&[], &shipment);
        let stages = build_progress(&shipment, &timeline);

        assert_eq!(stages.len(), 5);
        let titles: Vec<&str> = stages.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, STAGE_TITLES.to_vec());
        assert_eq!(stages[0].subtitle, "Recibimos tu envío");
        assert_eq!(
            stages.iter().map(|s| s.done).collect::<Vec<_>>(),
            vec![true, false, false, false, false]
        );
        assert!(stages[1..].iter().all(|s| s.subtitle == "-"));
    }

    #[test]
    fn test_skipped_stages_are_filled_in() {
        // Arrival without any recorded travel still completes the earlier stages
        let flags = done_flags(&[movement(DESTINATION, "D", "2025-03-02 09:00")]);
        assert_eq!(flags, vec![true, true, true, false, false]);
    }

    #[test]
    fn test_subtitles_follow_step_labels() {
        let shipment = shipment_123();
        let timeline = build_timeline(
            &[
                movement(ORIGIN, "V", "2025-03-01 10:30"),
                movement(ORIGIN, "C", "2025-03-01 09:00"),
            ],
            &shipment,
        );
        let stages = build_progress(&shipment, &timeline);

        assert_eq!(stages[1].subtitle, "En camino a destino");
        assert!(stages[1].done);
        assert!(!stages[2].done);
        // Classification shares the first slot and its label replaces the reception one
        assert_eq!(stages[0].subtitle, "En Proceso de Clasificación");
    }

    #[test]
    fn test_status_used_without_initial_step() {
        let shipment = shipment_123();
        let stages = build_progress(&shipment, &[]);
        assert_eq!(stages[0].subtitle, "En viaje");
        assert!(stages[0].done);

        let mut no_status = shipment_123();
        no_status.status = None;
        assert_eq!(build_progress(&no_status, &[])[0].subtitle, "-");
    }

    #[test]
    fn test_reserved_slots() {
        let shipment = shipment_123();
        let timeline = vec![TimelineStep::new(
            StepKey::Entrega,
            "Entregado",
            None,
            String::new(),
        )];
        let stages = build_progress(&shipment, &timeline);
        assert!(stages.iter().all(|s| s.done));
        assert_eq!(stages[4].subtitle, "Entregado");
        assert_eq!(stages[3].subtitle, "-");
    }
}
