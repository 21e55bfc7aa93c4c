//! Attaches track identities to a frame's detections after the registry update.

use std::collections::BTreeMap;

use crate::pipeline::detection::{Detection, TrackedDetection};
use crate::tracker::{TrackedObject, point_distance};

/// Assign each detection the ID of its closest live track, or `None` if no
/// track is within `max_distance`.
///
/// Ties go to the lowest track ID (the map iterates in ascending-ID order and
/// only a strictly closer track displaces the current best). This is an
/// independent nearest-neighbor pass over the registry's post-update state,
/// not a readback of the registry's own pairing; with several detections
/// crowded around several tracks the two can disagree, and two detections may
/// bind to the same track. O(detections x live tracks).
pub fn bind_tracks(
    detections: Vec<Detection>,
    objects: &BTreeMap<u64, TrackedObject>,
    max_distance: f32,
) -> Vec<TrackedDetection> {
    detections
        .into_iter()
        .map(|detection| {
            let centroid = detection.centroid();
            let mut best: Option<(u64, f32)> = None;

            for (&id, obj) in objects {
                let dist = point_distance(centroid, obj.centroid);
                if best.is_none_or(|(_, d)| dist < d) {
                    best = Some((id, dist));
                }
            }

            let track_id = match best {
                Some((id, dist)) if dist < max_distance => Some(id),
                _ => None,
            };

            TrackedDetection {
                detection,
                track_id,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det_at(cx: f32, cy: f32) -> Detection {
        Detection::new(cx - 5.0, cy - 5.0, cx + 5.0, cy + 5.0, 0.9, 0).unwrap()
    }

    fn objects(entries: &[(u64, (f32, f32))]) -> BTreeMap<u64, TrackedObject> {
        entries
            .iter()
            .map(|&(id, c)| (id, TrackedObject::new(id, c)))
            .collect()
    }

    #[test]
    fn test_binds_nearest_track() {
        let objs = objects(&[(0, (10.0, 10.0)), (1, (100.0, 100.0))]);
        let bound = bind_tracks(vec![det_at(98.0, 99.0)], &objs, 50.0);

        assert_eq!(bound.len(), 1);
        assert_eq!(bound[0].track_id, Some(1));
    }

    #[test]
    fn test_unbound_when_beyond_max_distance() {
        let objs = objects(&[(0, (10.0, 10.0))]);
        let bound = bind_tracks(vec![det_at(500.0, 500.0)], &objs, 50.0);

        assert_eq!(bound[0].track_id, None);
    }

    #[test]
    fn test_no_tracks_means_no_identity() {
        let bound = bind_tracks(vec![det_at(10.0, 10.0)], &BTreeMap::new(), 50.0);
        assert_eq!(bound[0].track_id, None);
    }

    #[test]
    fn test_tie_goes_to_lowest_id() {
        // Detection equidistant from tracks 3 and 7.
        let objs = objects(&[(3, (0.0, 10.0)), (7, (0.0, -10.0))]);
        let bound = bind_tracks(vec![det_at(0.0, 0.0)], &objs, 50.0);

        assert_eq!(bound[0].track_id, Some(3));
    }

    #[test]
    fn test_detection_order_is_preserved() {
        let objs = objects(&[(0, (10.0, 10.0)), (1, (100.0, 100.0))]);
        let dets = vec![det_at(100.0, 100.0), det_at(10.0, 10.0)];
        let bound = bind_tracks(dets, &objs, 50.0);

        assert_eq!(bound[0].track_id, Some(1));
        assert_eq!(bound[1].track_id, Some(0));
    }
}
