mod centroid_tracker;
mod matching;
mod rect;
mod track;

pub use centroid_tracker::{CentroidTracker, TrackerConfig};
pub use matching::{AssignmentResult, greedy_assignment};
pub use rect::{Rect, distance_matrix, point_distance};
pub use track::TrackedObject;
