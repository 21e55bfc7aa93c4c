//! Frame pipeline driver: detector, ROI filter, registry update, binder.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use thiserror::Error;
use tracing::{info, warn};

use crate::pipeline::binder::bind_tracks;
use crate::pipeline::detection::{Detection, TrackedDetection};
use crate::pipeline::detector::{DetectionSource, Frame};
use crate::pipeline::roi::Roi;
use crate::tracker::{CentroidTracker, Rect, TrackerConfig};

/// Boxed error for collaborator failures carried inside [`PipelineError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Produces frames strictly in arrival order.
pub trait FrameSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Next frame, `None` on end of stream. An error here is fatal to the run.
    fn next_frame(&mut self) -> Result<Option<Frame>, Self::Error>;

    /// Source frame rate in frames per second, if known. Progress hint only.
    fn frame_rate(&self) -> Option<f32> {
        None
    }

    /// Total frame count, if known. Progress hint only.
    fn frame_count(&self) -> Option<u64> {
        None
    }
}

/// Receives each frame together with its bound detections.
///
/// A write failure is fatal to the run; the caller still gets the statistics
/// for everything processed before the failure.
pub trait FrameSink {
    type Error: std::error::Error + Send + Sync + 'static;

    fn write(&mut self, frame: &Frame, detections: &[TrackedDetection]) -> Result<(), Self::Error>;
}

/// Configuration for the frame pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub tracker: TrackerConfig,
    /// Frames between progress log lines; 0 disables progress logging.
    pub progress_interval: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tracker: TrackerConfig::default(),
            progress_interval: 30,
        }
    }
}

/// Aggregate counters for one run.
///
/// Always reflects exactly the frames processed up to the point the run
/// ended, whether it finished, was cancelled, or failed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    /// Frames that went through the full detect/filter/track/bind path.
    pub frames_processed: u64,
    /// Frames passed through unannotated after a detector failure.
    pub frames_skipped: u64,
    /// Detector errors absorbed during the run.
    pub detector_errors: u64,
    /// Distinct tracks ever created by this run's registry.
    pub tracks_created: u64,
    /// Wall time spent in the run loop.
    pub elapsed: Duration,
    /// Whether the run ended at a cancellation check.
    pub cancelled: bool,
}

impl RunStats {
    /// Average processing throughput over the whole run.
    pub fn average_fps(&self) -> f64 {
        let frames = self.frames_processed + self.frames_skipped;
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 { frames as f64 / secs } else { 0.0 }
    }
}

/// Fatal pipeline failures. Each carries the statistics for the portion of
/// the run that completed before the failure.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("frame source failed: {source}")]
    Source {
        #[source]
        source: BoxError,
        stats: RunStats,
    },
    #[error("frame sink failed: {source}")]
    Sink {
        #[source]
        source: BoxError,
        stats: RunStats,
    },
}

impl PipelineError {
    /// Statistics for the work completed before the failure.
    pub fn stats(&self) -> &RunStats {
        match self {
            Self::Source { stats, .. } | Self::Sink { stats, .. } => stats,
        }
    }
}

/// Cooperative cancellation flag, honored at frame boundaries only.
///
/// Clones share the flag, so a host can keep one clone and hand another to
/// the run loop (e.g. from a signal handler thread).
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Outcome of processing one frame.
///
/// Detector failures are absorbed here as an explicit `Skipped` status
/// rather than unwinding the run.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// The frame went through the full pipeline; these are its detections
    /// with bound track identities.
    Processed(Vec<TrackedDetection>),
    /// The detector failed; the frame carries no annotations.
    Skipped,
}

/// Drives frames from a source through detection, ROI filtering, the track
/// registry, and the binder, into a sink.
///
/// Single-threaded and frame-sequential: the registry's state has a strict
/// temporal dependency on frame order, so each frame completes fully before
/// the next is read.
pub struct PackagePipeline<D, S, K> {
    detector: D,
    source: S,
    sink: K,
    roi: Option<Roi>,
    tracker: CentroidTracker,
    config: PipelineConfig,
    frames_processed: u64,
    frames_skipped: u64,
    detector_errors: u64,
}

impl<D, S, K> PackagePipeline<D, S, K>
where
    D: DetectionSource,
    D::Error: std::fmt::Display,
    S: FrameSource,
    K: FrameSink,
{
    /// Create a pipeline with a fresh, empty track registry.
    pub fn new(detector: D, source: S, sink: K, config: PipelineConfig) -> Self {
        let tracker = CentroidTracker::new(config.tracker.clone());
        Self {
            detector,
            source,
            sink,
            roi: None,
            tracker,
            config,
            frames_processed: 0,
            frames_skipped: 0,
            detector_errors: 0,
        }
    }

    /// Restrict detections to a region of interest. Without one, every
    /// detection is accepted.
    pub fn with_roi(mut self, roi: Option<Roi>) -> Self {
        if let Some(roi) = &roi {
            info!(kind = roi.kind(), points = roi.points().len(), "ROI loaded");
        }
        self.roi = roi;
        self
    }

    /// Run one frame through detect, ROI filter, registry update, and bind.
    pub fn process_frame(&mut self, frame: &Frame) -> FrameOutcome {
        let detections = match self.detector.detect(frame) {
            Ok(detections) => detections,
            Err(err) => {
                warn!(error = %err, "detector failed, skipping frame");
                self.detector_errors += 1;
                self.frames_skipped += 1;
                return FrameOutcome::Skipped;
            }
        };

        let detections: Vec<Detection> = match &self.roi {
            Some(roi) => detections
                .into_iter()
                .filter(|d| roi.contains(d.centroid()))
                .collect(),
            None => detections,
        };

        let rects: Vec<Rect> = detections.iter().map(|d| d.rect).collect();
        self.tracker.update(&rects);

        let max_distance = self.tracker.config().max_distance;
        let bound = bind_tracks(detections, self.tracker.objects(), max_distance);

        self.frames_processed += 1;
        FrameOutcome::Processed(bound)
    }

    /// Process frames until end of stream, cancellation, or a fatal error.
    ///
    /// Every frame read from the source is written to the sink, annotated
    /// when processing succeeded and bare when the detector failed. The
    /// returned statistics cover exactly the frames handled; on a fatal
    /// error they travel inside the [`PipelineError`].
    pub fn run(&mut self, cancel: &CancelToken) -> Result<RunStats, PipelineError> {
        let start = Instant::now();
        let total_frames = self.source.frame_count();
        let mut cancelled = false;

        loop {
            if cancel.is_cancelled() {
                info!("cancellation requested, stopping at frame boundary");
                cancelled = true;
                break;
            }

            let frame = match self.source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => break,
                Err(err) => {
                    return Err(PipelineError::Source {
                        source: Box::new(err),
                        stats: self.stats(start.elapsed(), cancelled),
                    });
                }
            };

            let outcome = self.process_frame(&frame);
            let detections: &[TrackedDetection] = match &outcome {
                FrameOutcome::Processed(detections) => detections,
                FrameOutcome::Skipped => &[],
            };

            if let Err(err) = self.sink.write(&frame, detections) {
                return Err(PipelineError::Sink {
                    source: Box::new(err),
                    stats: self.stats(start.elapsed(), cancelled),
                });
            }

            let handled = self.frames_processed + self.frames_skipped;
            if self.config.progress_interval > 0 && handled % self.config.progress_interval == 0 {
                let elapsed = start.elapsed().as_secs_f64();
                let fps = if elapsed > 0.0 {
                    handled as f64 / elapsed
                } else {
                    0.0
                };
                info!(
                    frame = handled,
                    total = ?total_frames,
                    live_tracks = self.tracker.len(),
                    fps,
                    "progress"
                );
            }
        }

        let stats = self.stats(start.elapsed(), cancelled);
        info!(
            frames = stats.frames_processed,
            skipped = stats.frames_skipped,
            tracks = stats.tracks_created,
            elapsed_s = stats.elapsed.as_secs_f64(),
            "run finished"
        );
        Ok(stats)
    }

    fn stats(&self, elapsed: Duration, cancelled: bool) -> RunStats {
        RunStats {
            frames_processed: self.frames_processed,
            frames_skipped: self.frames_skipped,
            detector_errors: self.detector_errors,
            tracks_created: self.tracker.tracks_created(),
            elapsed,
            cancelled,
        }
    }

    /// Get a reference to the underlying detector.
    pub fn detector(&self) -> &D {
        &self.detector
    }

    /// Get a mutable reference to the underlying detector.
    pub fn detector_mut(&mut self) -> &mut D {
        &mut self.detector
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &CentroidTracker {
        &self.tracker
    }

    /// Get a reference to the underlying sink.
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// The active region of interest, if any.
    pub fn roi(&self) -> Option<&Roi> {
        self.roi.as_ref()
    }
}
