#[cfg(test)]
mod tests {
    use crate::models::StepKey;
    use crate::progress::build_progress;
    use crate::rules::apply_rules;
    use crate::test_support::shipment_123;
    use crate::timeline::build_timeline;
    use brio_common::models::MovementEvent;
    use proptest::prelude::*;
    use std::collections::HashSet;

    // Branches 1 (origin), 2 (destination) and 3 (elsewhere), or missing
    fn arb_movement() -> impl Strategy<Value = MovementEvent> {
        (
            prop::option::weighted(0.9, 1..=3i64),
            prop::option::weighted(0.9, prop::sample::select(vec!["C", "V", "D", "c", " v", "X"])),
            0..10_000u32,
        )
            .prop_map(|(branch, op, minute)| MovementEvent {
                updated_at: Some(format!("t{:05}", minute)),
                shipment_id: 123,
                destination_branch_id: Some(2),
                current_branch_id: branch,
                operation: op.map(str::to_string),
                ..Default::default()
            })
    }

    proptest! {
        // At most one step per key, taken from the newest matching movement
        #[test]
        fn test_one_step_per_key_from_newest(movements in prop::collection::vec(arb_movement(), 0..30)) {
            let shipment = shipment_123();
            let timeline = build_timeline(&movements, &shipment);

            let mut keys = HashSet::new();
            for step in &timeline {
                prop_assert!(keys.insert(step.key), "duplicate key {}", step.key);
            }

            for step in timeline.iter().filter(|s| s.key != StepKey::Inicio) {
                let newest = movements
                    .iter()
                    .find_map(|m| apply_rules(m, &shipment).filter(|s| s.key == step.key));
                prop_assert_eq!(Some(step), newest.as_ref());
            }
        }

        // The reception step is present exactly once and always last
        #[test]
        fn test_initial_step_once_and_last(movements in prop::collection::vec(arb_movement(), 0..30)) {
            let timeline = build_timeline(&movements, &shipment_123());
            let count = timeline.iter().filter(|s| s.key == StepKey::Inicio).count();
            prop_assert_eq!(count, 1);
            prop_assert_eq!(timeline.last().map(|s| s.key), Some(StepKey::Inicio));
        }

        // A done stage implies every earlier stage is done
        #[test]
        fn test_progress_is_monotonic(movements in prop::collection::vec(arb_movement(), 0..30)) {
            let shipment = shipment_123();
            let timeline = build_timeline(&movements, &shipment);
            let stages = build_progress(&shipment, &timeline);

            prop_assert_eq!(stages.len(), 5);
            prop_assert!(stages[0].done);
            for i in 0..stages.len() {
                if stages[i].done {
                    prop_assert!(stages[..i].iter().all(|s| s.done));
                }
            }
        }
    }
}
