//! Per-kind time-series storage.
//!
//! A [`Series`] is the ordered history of one entity: an ordered map keyed
//! directly by time step, so at most one snapshot exists per time step and
//! iteration is always ascending regardless of arrival order. A
//! [`SeriesStore`] maps entity ids to their series for one entity kind
//! within one simulation.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::RwLock;
use tracing::debug;
use transflow_types::TimeSeriesEntity;

/// The time-ordered snapshots of a single entity.
///
/// Guarded by its own read-write lock: writers to one series never block
/// readers or writers of another, and readers always see whole snapshots.
#[derive(Debug)]
pub struct Series<T> {
    points: RwLock<BTreeMap<i64, T>>,
}

impl<T> Default for Series<T> {
    fn default() -> Self {
        Self {
            points: RwLock::new(BTreeMap::new()),
        }
    }
}

impl<T: TimeSeriesEntity> Series<T> {
    /// A series holding exactly one snapshot.
    pub fn with_snapshot(snapshot: T) -> Self {
        let mut points = BTreeMap::new();
        points.insert(snapshot.time_step(), snapshot);
        Self {
            points: RwLock::new(points),
        }
    }

    /// Insert a snapshot at its time step.
    ///
    /// A snapshot already stored at the same time step is replaced and
    /// returned: for a given `(id, time step)` the last write wins.
    pub fn insert(&self, snapshot: T) -> Option<T> {
        self.points.write().insert(snapshot.time_step(), snapshot)
    }

    /// The snapshot taken exactly at `time_step`, if any.
    pub fn at(&self, time_step: i64) -> Option<T> {
        self.points.read().get(&time_step).cloned()
    }

    /// All snapshots with `from <= time_step <= to`, ascending.
    ///
    /// Empty when `from > to`.
    pub fn range(&self, from: i64, to: i64) -> Vec<T> {
        if from > to {
            return Vec::new();
        }
        self.points.read().range(from..=to).map(|(_, s)| s.clone()).collect()
    }

    /// Every snapshot, ascending by time step.
    pub fn all(&self) -> Vec<T> {
        self.points.read().values().cloned().collect()
    }

    /// The earliest snapshot.
    pub fn first(&self) -> Option<T> {
        self.points.read().first_key_value().map(|(_, s)| s.clone())
    }

    /// Number of stored snapshots.
    pub fn len(&self) -> usize {
        self.points.read().len()
    }

    /// Whether the series holds no snapshots.
    pub fn is_empty(&self) -> bool {
        self.points.read().is_empty()
    }
}

/// All series of one entity kind within one simulation, keyed by entity id.
#[derive(Debug)]
pub struct SeriesStore<T> {
    series: DashMap<String, Arc<Series<T>>>,
}

impl<T> Default for SeriesStore<T> {
    fn default() -> Self {
        Self {
            series: DashMap::new(),
        }
    }
}

impl<T: TimeSeriesEntity> SeriesStore<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a snapshot in its entity's series, creating the series on
    /// first sight of the id.
    ///
    /// Returns the length of the series after the insert.
    pub fn add(&self, snapshot: T) -> usize {
        let id = snapshot.id().to_owned();
        let time_step = snapshot.time_step();

        // A new series is published already holding its first snapshot, so
        // `keys()` never reports an id whose series is empty.
        let series = match self.series.entry(id.clone()) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(Series::with_snapshot(snapshot)));
                debug!(
                    domain = %T::DOMAIN,
                    id = id,
                    time_step,
                    series_len = 1,
                    "stored snapshot"
                );
                return 1;
            }
        };

        // The map shard is released here, before the series lock is taken.
        if series.insert(snapshot).is_some() {
            debug!(
                domain = %T::DOMAIN,
                id = id,
                time_step,
                "replaced snapshot at existing time step"
            );
        }

        let len = series.len();
        debug!(
            domain = %T::DOMAIN,
            id = id,
            time_step,
            series_len = len,
            "stored snapshot"
        );
        len
    }

    /// The series of `id`, if any snapshot was ever stored for it.
    pub fn series(&self, id: &str) -> Option<Arc<Series<T>>> {
        self.series.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// The snapshot of `id` taken exactly at `time_step`.
    ///
    /// `None` when the id is unknown or no snapshot has that time step.
    pub fn get_at_point(&self, id: &str, time_step: i64) -> Option<T> {
        self.series(id).and_then(|series| series.at(time_step))
    }

    /// Snapshots of `id` with `from <= time_step <= to`, ascending.
    ///
    /// Empty when the id is unknown or nothing falls in the range.
    pub fn get_in_range(&self, id: &str, from: i64, to: i64) -> Vec<T> {
        self.series(id)
            .map(|series| series.range(from, to))
            .unwrap_or_default()
    }

    /// Every snapshot of `id`, ascending.
    pub fn get_full_series(&self, id: &str) -> Vec<T> {
        self.series(id).map(|series| series.all()).unwrap_or_default()
    }

    /// Every entity id with at least one stored snapshot.
    pub fn keys(&self) -> BTreeSet<String> {
        self.series.iter().map(|entry| entry.key().clone()).collect()
    }

    /// The earliest snapshot of every known entity, ordered by id.
    ///
    /// Used for attributes that do not change over a run, such as a
    /// vehicle's type.
    pub fn first_snapshot_of_each(&self) -> Vec<T> {
        let mut all: Vec<(String, Arc<Series<T>>)> = self
            .series
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect();
        all.sort_by(|a, b| a.0.cmp(&b.0));

        all.into_iter()
            .filter_map(|(_, series)| series.first())
            .collect()
    }

    /// Number of known entities.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether no entity has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use transflow_types::Vehicle;

    use super::*;

    fn vehicle(id: &str, time_step: i64, speed: f64) -> Vehicle {
        Vehicle {
            id: id.to_owned(),
            time_step,
            speed: Some(speed),
            ..Vehicle::default()
        }
    }

    fn steps(snapshots: &[Vehicle]) -> Vec<i64> {
        snapshots.iter().map(|v| v.time_step).collect()
    }

    #[test]
    fn add_creates_series_on_first_sight() {
        let store = SeriesStore::new();
        assert!(store.is_empty());
        assert_eq!(store.add(vehicle("v1", 1, 1.0)), 1);
        assert_eq!(store.add(vehicle("v1", 2, 1.0)), 2);
        assert_eq!(store.add(vehicle("v2", 1, 1.0)), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn duplicate_time_step_keeps_one_snapshot() {
        let store = SeriesStore::new();
        store.add(vehicle("v1", 10, 1.0));
        let len = store.add(vehicle("v1", 10, 2.0));
        assert_eq!(len, 1);

        let stored = store.get_at_point("v1", 10).map(|v| v.speed);
        assert_eq!(stored, Some(Some(2.0)));
    }

    #[test]
    fn out_of_order_inserts_come_back_sorted() {
        let store = SeriesStore::new();
        for t in [5, 1, 4, 2, 3] {
            store.add(vehicle("v1", t, 0.0));
        }
        assert_eq!(steps(&store.get_full_series("v1")), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn point_lookup_misses() {
        let store = SeriesStore::new();
        store.add(vehicle("v1", 120, 13.2));
        assert!(store.get_at_point("v1", 120).is_some());
        assert!(store.get_at_point("v1", 121).is_none());
        assert!(store.get_at_point("v2", 120).is_none());
    }

    #[test]
    fn range_is_inclusive_on_both_ends() {
        let store = SeriesStore::new();
        for t in 0..10 {
            store.add(vehicle("v1", t, 0.0));
        }
        assert_eq!(steps(&store.get_in_range("v1", 3, 6)), vec![3, 4, 5, 6]);
        assert_eq!(steps(&store.get_in_range("v1", 9, 20)), vec![9]);
        assert_eq!(steps(&store.get_in_range("v1", -5, 0)), vec![0]);
    }

    #[test]
    fn range_empty_cases() {
        let store = SeriesStore::new();
        store.add(vehicle("v1", 5, 0.0));
        assert!(store.get_in_range("v1", 6, 10).is_empty());
        assert!(store.get_in_range("v1", 10, 0).is_empty());
        assert!(store.get_in_range("unknown", i64::MIN, i64::MAX).is_empty());
        assert_eq!(steps(&store.get_in_range("v1", i64::MIN, i64::MAX)), vec![5]);
    }

    #[test]
    fn full_series_of_unknown_id_is_empty() {
        let store: SeriesStore<Vehicle> = SeriesStore::new();
        assert!(store.get_full_series("ghost").is_empty());
    }

    #[test]
    fn keys_lists_known_ids() {
        let store = SeriesStore::new();
        store.add(vehicle("b", 1, 0.0));
        store.add(vehicle("a", 1, 0.0));
        store.add(vehicle("a", 2, 0.0));
        let keys: Vec<String> = store.keys().into_iter().collect();
        assert_eq!(keys, vec![String::from("a"), String::from("b")]);
    }

    #[test]
    fn first_snapshot_of_each_picks_minimum_time_step() {
        let store = SeriesStore::new();
        store.add(vehicle("b", 7, 7.0));
        store.add(vehicle("a", 3, 3.0));
        store.add(vehicle("a", 1, 1.0));
        store.add(vehicle("b", 2, 2.0));

        let firsts: Vec<(String, i64)> = store
            .first_snapshot_of_each()
            .into_iter()
            .map(|v| (v.id, v.time_step))
            .collect();
        assert_eq!(firsts, vec![(String::from("a"), 1), (String::from("b"), 2)]);
    }

    #[test]
    fn series_first_is_minimum_time_step() {
        let series = Series::default();
        assert!(series.is_empty());
        assert!(series.first().is_none());
        series.insert(vehicle("v", 4, 0.0));
        series.insert(vehicle("v", 2, 0.0));
        series.insert(vehicle("v", 9, 0.0));
        assert_eq!(series.first().map(|v| v.time_step), Some(2));
        assert_eq!(series.len(), 3);
    }

    #[test]
    fn with_snapshot_starts_non_empty() {
        let series = Series::with_snapshot(vehicle("v", 3, 0.0));
        assert_eq!(series.len(), 1);
        assert_eq!(series.first().map(|v| v.time_step), Some(3));
    }

    #[test]
    fn listed_keys_never_have_empty_series() {
        let store: SeriesStore<Vehicle> = SeriesStore::new();
        let done = std::sync::atomic::AtomicBool::new(false);

        std::thread::scope(|scope| {
            scope.spawn(|| {
                for i in 0..2_000 {
                    store.add(vehicle(&format!("v{i}"), 1, 0.0));
                }
                done.store(true, std::sync::atomic::Ordering::Release);
            });
            scope.spawn(|| {
                loop {
                    let finished = done.load(std::sync::atomic::Ordering::Acquire);
                    for id in store.keys() {
                        let series = store.series(&id).unwrap();
                        assert!(!series.is_empty(), "series {id} listed while empty");
                        assert!(!store.get_full_series(&id).is_empty());
                    }
                    if finished {
                        break;
                    }
                }
            });
        });

        assert_eq!(store.len(), 2_000);
    }
}
