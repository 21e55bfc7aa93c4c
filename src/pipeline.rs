//! Integration module connecting detection backends to the centroid tracker.
//!
//! Provides the typed detection record, the ROI filter, the binder that
//! attaches track identities to detections, and the frame pipeline driver
//! that sequences them over a video-shaped input.

mod binder;
mod detection;
mod detector;
mod driver;
mod roi;

pub use binder::bind_tracks;
pub use detection::{Detection, DetectionBuilder, DetectionError, TrackedDetection};
pub use detector::{DetectionSource, Frame};
pub use driver::{
    BoxError, CancelToken, FrameOutcome, FrameSink, FrameSource, PackagePipeline, PipelineConfig,
    PipelineError, RunStats,
};
pub use roi::{Roi, RoiError};
