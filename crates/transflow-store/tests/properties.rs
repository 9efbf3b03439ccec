//! Property tests for topic parsing and for series ordering, deduplication
//! and range queries.

#![allow(clippy::unwrap_used)]

use std::collections::BTreeSet;

use proptest::prelude::*;
use transflow_store::topic::parse;
use transflow_store::{SeriesStore, TopicLayout};
use transflow_types::{Domain, Edge, Vehicle};

fn vehicle(id: &str, time_step: i64) -> Vehicle {
    Vehicle {
        id: id.to_owned(),
        time_step,
        ..Vehicle::default()
    }
}

fn any_domain() -> impl Strategy<Value = Domain> {
    prop::sample::select(Domain::ALL.to_vec())
}

/// A set of distinct time steps together with a random permutation of it.
fn permuted_steps() -> impl Strategy<Value = (Vec<i64>, Vec<i64>)> {
    prop::collection::btree_set(-1_000i64..1_000, 0..64).prop_flat_map(|set| {
        let sorted: Vec<i64> = set.into_iter().collect();
        (Just(sorted.clone()), Just(sorted).prop_shuffle())
    })
}

proptest! {
    #[test]
    fn any_insertion_order_yields_ascending_series((sorted, shuffled) in permuted_steps()) {
        let store = SeriesStore::new();
        for t in &shuffled {
            store.add(vehicle("v", *t));
        }

        let stored: Vec<i64> = store.get_full_series("v").iter().map(|v| v.time_step).collect();
        prop_assert_eq!(stored, sorted);
    }

    #[test]
    fn duplicates_collapse_to_one_snapshot_per_step(steps in prop::collection::vec(0i64..20, 0..80)) {
        let store = SeriesStore::new();
        for (n, t) in steps.iter().enumerate() {
            store.add(Edge {
                id: String::from("e"),
                time_step: *t,
                vehicle_count: u32::try_from(n).ok(),
                ..Edge::default()
            });
        }

        let expected: Vec<i64> = steps.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        let stored = store.get_full_series("e");
        prop_assert_eq!(stored.iter().map(|e| e.time_step).collect::<Vec<_>>(), expected);

        // Last write wins for each time step.
        for snapshot in &stored {
            let last_write = steps.iter().rposition(|t| *t == snapshot.time_step);
            prop_assert_eq!(
                snapshot.vehicle_count,
                last_write.and_then(|n| u32::try_from(n).ok())
            );
        }
    }

    #[test]
    fn range_returns_exactly_the_inclusive_window(
        (sorted, shuffled) in permuted_steps(),
        a in -1_100i64..1_100,
        b in -1_100i64..1_100,
    ) {
        let store = SeriesStore::new();
        for t in &shuffled {
            store.add(vehicle("v", *t));
        }

        let expected: Vec<i64> = sorted.iter().copied().filter(|t| a <= *t && *t <= b).collect();
        let got: Vec<i64> = store.get_in_range("v", a, b).iter().map(|v| v.time_step).collect();
        prop_assert_eq!(got, expected);
        prop_assert!(store.get_in_range("other", a, b).is_empty());
    }

    #[test]
    fn point_lookup_hits_only_stored_steps(
        (sorted, shuffled) in permuted_steps(),
        probe in -1_100i64..1_100,
    ) {
        let store = SeriesStore::new();
        for t in &shuffled {
            store.add(vehicle("v", *t));
        }

        let found = store.get_at_point("v", probe).map(|v| v.time_step);
        let expected = sorted.contains(&probe).then_some(probe);
        prop_assert_eq!(found, expected);
        prop_assert!(store.get_at_point("other", probe).is_none());
    }

    #[test]
    fn built_topics_parse_back(
        simulation_id in "[A-Za-z0-9_.-]{1,16}",
        domain in any_domain(),
        time_step in any::<i64>(),
    ) {
        let layout = TopicLayout::default();
        let parsed = layout.parse(&layout.topic_for(&simulation_id, domain, time_step)).unwrap();
        prop_assert_eq!(parsed.simulation_id, simulation_id);
        prop_assert_eq!(parsed.domain, domain);
        prop_assert_eq!(parsed.time_step, time_step);
    }

    #[test]
    fn non_numeric_time_steps_are_rejected(
        domain in any_domain(),
        time in "[0-9]{0,4}[a-z.][0-9a-z.]{0,4}",
    ) {
        let topic = format!("sim/run1/metrics/{}/{time}", domain.as_tag());
        let err = parse(&topic).unwrap_err();
        prop_assert_eq!(err.topic(), topic.as_str());
    }

    #[test]
    fn wrong_segment_counts_are_rejected(segments in prop::collection::vec("[a-z0-9]{1,6}", 0..10)) {
        prop_assume!(segments.len() != 5);
        let topic = segments.join("/");
        let err = parse(&topic).unwrap_err();
        prop_assert_eq!(err.topic(), topic.as_str());
    }
}
