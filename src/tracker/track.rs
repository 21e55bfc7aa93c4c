//! Single tracked object record.

/// One object the registry currently believes exists.
///
/// Owned exclusively by the [`CentroidTracker`](crate::tracker::CentroidTracker);
/// consumers get copies or map references, never long-lived handles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedObject {
    /// Unique identifier, assigned monotonically at registration and never
    /// reused after eviction.
    pub id: u64,
    /// Current centroid position in frame pixel coordinates.
    pub centroid: (f32, f32),
    /// Consecutive frames since the last successful match.
    pub disappeared_count: u32,
}

impl TrackedObject {
    pub fn new(id: u64, centroid: (f32, f32)) -> Self {
        Self {
            id,
            centroid,
            disappeared_count: 0,
        }
    }

    /// Record a successful match at a new position.
    pub fn mark_matched(&mut self, centroid: (f32, f32)) {
        self.centroid = centroid;
        self.disappeared_count = 0;
    }

    /// Record one frame without a match.
    pub fn mark_disappeared(&mut self) {
        self.disappeared_count += 1;
    }
}
