//! Property-based tests for pillar rotation, posting slots and batch clamping

use postcraft::generation::{scheduled_slot, GenerationRequest, POSTING_DAYS, POSTING_TIMES};
use postcraft::pillar::{PillarSelector, PILLARS};
use proptest::prelude::*;

proptest! {
    #[test]
    fn rotation_cycles_through_pillars(position in 0usize..10_000) {
        let selector = PillarSelector::new(None);
        prop_assert_eq!(selector.index_for(position), position % PILLARS.len());
        prop_assert_eq!(selector.pillar_for(position).name, PILLARS[position % 5].name);
    }

    #[test]
    fn focus_pins_every_position(pillar in 0usize..5, position in 0usize..1_000) {
        let name = PILLARS[pillar].name.to_uppercase();
        let selector = PillarSelector::new(Some(name.as_str()));
        prop_assert_eq!(selector.index_for(position), pillar);
    }

    #[test]
    fn slot_pairs_day_and_time_independently(position in 0usize..10_000) {
        let expected = format!(
            "{} {}",
            POSTING_DAYS[position % 5],
            POSTING_TIMES[position % 4]
        );
        prop_assert_eq!(scheduled_slot(position), expected);
        prop_assert_eq!(scheduled_slot(position), scheduled_slot(position + 20));
    }

    #[test]
    fn effective_count_never_exceeds_maximum(requested in 0usize..1_000, max in 1usize..=10) {
        let request = GenerationRequest::new(requested, None);
        let count = request.effective_count(max);
        prop_assert!(count <= max);
        prop_assert_eq!(count, requested.min(max));
    }

    #[test]
    fn decoded_counts_round_through_json(count in 0u32..100_000) {
        let body = format!(r#"{{"count": {}}}"#, count);
        let request = GenerationRequest::from_json(body.as_bytes(), 7).unwrap();
        prop_assert_eq!(request.requested_count, count as usize);
    }
}
