//! Property tests for the schedule enumeration.

mod common;

use common::init_test_logging;
use proptest::prelude::*;
use threadweave::{enumerate_schedules, is_order_preserving, schedule_count, Event, EventSequence};

/// An authored input sequence: a small run of events spread over up to three
/// threads. Kept small because the enumeration walks N! candidates.
fn authored_input() -> impl Strategy<Value = Vec<Event>> {
    proptest::collection::vec(0usize..3, 0..=7).prop_map(|thread_picks| {
        let mut per_thread_position = [0usize; 3];
        thread_picks
            .into_iter()
            .map(|t| {
                let position = per_thread_position[t];
                per_thread_position[t] += 1;
                let operation = format!("op{position}");
                if position % 2 == 0 {
                    Event::begin(format!("t{t}"), operation)
                } else {
                    Event::end(format!("t{t}"), operation)
                }
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn enumeration_size_matches_the_multinomial(input in authored_input()) {
        init_test_logging();
        let schedules = enumerate_schedules(&input);
        prop_assert_eq!(schedules.len() as u128, schedule_count(&input));
    }

    #[test]
    fn every_schedule_preserves_per_thread_order(input in authored_input()) {
        init_test_logging();
        for schedule in enumerate_schedules(&input) {
            prop_assert!(is_order_preserving(&schedule, &input));
        }
    }

    #[test]
    fn schedules_are_pairwise_distinct(input in authored_input()) {
        init_test_logging();
        let schedules = enumerate_schedules(&input);
        let mut seen: Vec<&EventSequence> = Vec::with_capacity(schedules.len());
        for schedule in &schedules {
            prop_assert!(!seen.contains(&schedule), "duplicate schedule {:?}", schedule);
            seen.push(schedule);
        }
    }

    #[test]
    fn the_input_is_always_among_its_own_schedules(input in authored_input()) {
        init_test_logging();
        prop_assert!(enumerate_schedules(&input).contains(&input));
    }

    #[test]
    fn single_thread_inputs_admit_exactly_one_schedule(
        length in 0usize..6,
    ) {
        init_test_logging();
        let input: Vec<Event> = (0..length)
            .map(|i| Event::begin("only", format!("op{i}")))
            .collect();
        let schedules = enumerate_schedules(&input);
        prop_assert_eq!(schedules, vec![input]);
    }
}
