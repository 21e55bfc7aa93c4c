//! Centroid tracker: the registry of live tracked objects.

use std::collections::BTreeMap;

use crate::tracker::matching::{self, AssignmentResult};
use crate::tracker::rect::{Rect, distance_matrix};
use crate::tracker::track::TrackedObject;

/// Configuration for the centroid tracker.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Consecutive unmatched frames tolerated before a track is evicted.
    pub max_disappeared: u32,
    /// Maximum centroid distance (pixels) for a valid match.
    pub max_distance: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_disappeared: 30,
            max_distance: 50.0,
        }
    }
}

/// Frame-to-frame object association by centroid distance.
///
/// The registry owns every live [`TrackedObject`] and is the only issuer of
/// track IDs: IDs increase monotonically over the registry's lifetime and are
/// never reused after eviction. Each processing run constructs its own
/// instance; there is no process-wide tracker state.
///
/// Not designed for concurrent access. A host exposing live statistics to
/// another thread should hand it a [`snapshot`](CentroidTracker::snapshot).
pub struct CentroidTracker {
    objects: BTreeMap<u64, TrackedObject>,
    next_id: u64,
    tracks_created: u64,
    config: TrackerConfig,
}

impl CentroidTracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            objects: BTreeMap::new(),
            next_id: 0,
            tracks_created: 0,
            config,
        }
    }

    pub fn with_default_config() -> Self {
        Self::new(TrackerConfig::default())
    }

    /// Advance the registry by one frame of detections.
    ///
    /// Matched objects move to their detection's centroid and have their
    /// disappeared count reset; unmatched objects age by one frame and are
    /// evicted once they exceed `max_disappeared`; unmatched detections
    /// register as new objects. Returns the live objects after the update.
    pub fn update(&mut self, rects: &[Rect]) -> &BTreeMap<u64, TrackedObject> {
        if rects.is_empty() {
            self.age_all();
            return &self.objects;
        }

        let input_centroids: Vec<(f32, f32)> = rects.iter().map(|r| r.centroid()).collect();

        if self.objects.is_empty() {
            for centroid in input_centroids {
                self.register(centroid);
            }
            return &self.objects;
        }

        // BTreeMap iteration gives ascending-ID row order, which the greedy
        // matcher's tie-break depends on.
        let object_ids: Vec<u64> = self.objects.keys().copied().collect();
        let object_centroids: Vec<(f32, f32)> =
            self.objects.values().map(|o| o.centroid).collect();

        let dists = distance_matrix(&object_centroids, &input_centroids);
        let AssignmentResult {
            matches,
            unmatched_tracks,
            unmatched_detections,
        } = matching::greedy_assignment(&dists, self.config.max_distance);

        for (row, col) in matches {
            let id = object_ids[row];
            if let Some(obj) = self.objects.get_mut(&id) {
                obj.mark_matched(input_centroids[col]);
            }
        }

        for row in unmatched_tracks {
            self.age_one(object_ids[row]);
        }

        for col in unmatched_detections {
            self.register(input_centroids[col]);
        }

        &self.objects
    }

    /// Live objects, keyed by track ID in ascending order.
    pub fn objects(&self) -> &BTreeMap<u64, TrackedObject> {
        &self.objects
    }

    /// Copy-on-read snapshot of ID to centroid, safe to hand to another thread.
    pub fn snapshot(&self) -> BTreeMap<u64, (f32, f32)> {
        self.objects.iter().map(|(&id, o)| (id, o.centroid)).collect()
    }

    /// Total distinct tracks ever created by this registry.
    pub fn tracks_created(&self) -> u64 {
        self.tracks_created
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    fn register(&mut self, centroid: (f32, f32)) {
        let id = self.next_id;
        self.next_id += 1;
        self.tracks_created += 1;
        self.objects.insert(id, TrackedObject::new(id, centroid));
    }

    fn age_all(&mut self) {
        let ids: Vec<u64> = self.objects.keys().copied().collect();
        for id in ids {
            self.age_one(id);
        }
    }

    fn age_one(&mut self, id: u64) {
        let evict = match self.objects.get_mut(&id) {
            Some(obj) => {
                obj.mark_disappeared();
                obj.disappeared_count > self.config.max_disappeared
            }
            None => false,
        };
        if evict {
            self.objects.remove(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_at(cx: f32, cy: f32) -> Rect {
        Rect::from_tlbr(cx - 5.0, cy - 5.0, cx + 5.0, cy + 5.0)
    }

    #[test]
    fn test_registers_into_empty_registry() {
        let mut tracker = CentroidTracker::with_default_config();
        let objects = tracker.update(&[rect_at(10.0, 10.0), rect_at(100.0, 100.0)]);

        assert_eq!(objects.len(), 2);
        assert_eq!(objects[&0].centroid, (10.0, 10.0));
        assert_eq!(objects[&1].centroid, (100.0, 100.0));
    }

    #[test]
    fn test_ids_are_monotonic_and_never_reused() {
        let mut tracker = CentroidTracker::new(TrackerConfig {
            max_disappeared: 0,
            max_distance: 10.0,
        });

        tracker.update(&[rect_at(10.0, 10.0)]);
        assert!(tracker.objects().contains_key(&0));

        // One empty frame evicts track 0 (max_disappeared = 0).
        tracker.update(&[]);
        assert!(tracker.is_empty());

        // A new object at the same spot gets a fresh ID.
        let objects = tracker.update(&[rect_at(10.0, 10.0)]);
        assert!(objects.contains_key(&1));
        assert!(!objects.contains_key(&0));
        assert_eq!(tracker.tracks_created(), 2);
    }

    #[test]
    fn test_match_moves_centroid() {
        let mut tracker = CentroidTracker::with_default_config();
        tracker.update(&[rect_at(10.0, 10.0)]);
        let objects = tracker.update(&[rect_at(14.0, 13.0)]);

        assert_eq!(objects.len(), 1);
        assert_eq!(objects[&0].centroid, (14.0, 13.0));
        assert_eq!(objects[&0].disappeared_count, 0);
    }

    #[test]
    fn test_empty_updates_age_without_registering() {
        let mut tracker = CentroidTracker::with_default_config();
        tracker.update(&[rect_at(10.0, 10.0)]);

        for expected in 1..=3 {
            let objects = tracker.update(&[]);
            assert_eq!(objects.len(), 1);
            assert_eq!(objects[&0].disappeared_count, expected);
        }
    }

    #[test]
    fn test_eviction_happens_strictly_after_max_disappeared() {
        let mut tracker = CentroidTracker::new(TrackerConfig {
            max_disappeared: 2,
            max_distance: 10.0,
        });
        tracker.update(&[rect_at(10.0, 10.0)]);

        // Present at exactly max_disappeared unmatched updates.
        tracker.update(&[]);
        assert_eq!(tracker.objects()[&0].disappeared_count, 1);
        tracker.update(&[]);
        assert_eq!(tracker.objects()[&0].disappeared_count, 2);

        // Gone on the update that pushes the count past the limit.
        let objects = tracker.update(&[]);
        assert!(objects.is_empty());
    }

    #[test]
    fn test_distant_detection_spawns_new_track() {
        let mut tracker = CentroidTracker::new(TrackerConfig {
            max_disappeared: 5,
            max_distance: 5.0,
        });
        tracker.update(&[rect_at(0.0, 0.0)]);

        // (3,3) is within range of track 0.
        let objects = tracker.update(&[rect_at(3.0, 3.0)]);
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[&0].centroid, (3.0, 3.0));

        // (20,20) is out of range: track 0 ages, track 1 registers.
        let objects = tracker.update(&[rect_at(20.0, 20.0)]);
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[&0].disappeared_count, 1);
        assert_eq!(objects[&1].centroid, (20.0, 20.0));
        assert_eq!(objects[&1].disappeared_count, 0);
    }

    #[test]
    fn test_unmatched_tracks_age_even_when_detections_outnumber_tracks() {
        let mut tracker = CentroidTracker::new(TrackerConfig {
            max_disappeared: 5,
            max_distance: 5.0,
        });
        tracker.update(&[rect_at(0.0, 0.0)]);

        // Two far-away detections: both register, and the stale track still ages.
        let objects = tracker.update(&[rect_at(50.0, 50.0), rect_at(100.0, 100.0)]);
        assert_eq!(objects.len(), 3);
        assert_eq!(objects[&0].disappeared_count, 1);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut tracker = CentroidTracker::with_default_config();
        tracker.update(&[rect_at(10.0, 10.0)]);

        let snap = tracker.snapshot();
        tracker.update(&[rect_at(30.0, 30.0)]);

        assert_eq!(snap[&0], (10.0, 10.0));
        assert_eq!(tracker.objects()[&0].centroid, (30.0, 30.0));
    }
}
