//! Centroid-based multi-object tracking for conveyor belt package detection.
//!
//! The crate turns per-frame detector output (bounding boxes with confidence
//! and class) into stable object identities across frames. The `tracker`
//! module holds the algorithmic core: a registry that associates detections
//! to existing tracks by centroid distance, registers new objects, and evicts
//! tracks that have gone unseen for too long. The `pipeline` module wires a
//! detection backend, a frame source, an optional region of interest, and an
//! output sink into a frame-sequential processing loop.

pub mod pipeline;
pub mod tracker;

pub use pipeline::{
    CancelToken, Detection, DetectionBuilder, DetectionError, DetectionSource, Frame, FrameOutcome,
    FrameSink, FrameSource, PackagePipeline, PipelineConfig, PipelineError, Roi, RoiError,
    RunStats, TrackedDetection,
};
pub use tracker::{CentroidTracker, Rect, TrackedObject, TrackerConfig};
