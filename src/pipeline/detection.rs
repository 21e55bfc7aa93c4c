//! Typed detection records and a builder for creating them.

use thiserror::Error;

use crate::tracker::Rect;

/// Errors from detection record validation.
#[derive(Debug, Error, PartialEq)]
pub enum DetectionError {
    #[error("invalid bounding box ({x1}, {y1}, {x2}, {y2}): requires x1 < x2 and y1 < y2")]
    InvalidBox { x1: f32, y1: f32, x2: f32, y2: f32 },
    #[error("confidence {0} outside [0, 1]")]
    InvalidConfidence(f32),
}

/// One detector output for one frame.
///
/// Ephemeral: lives for the duration of a single frame's processing, then is
/// either dropped or carried forward inside a [`TrackedDetection`].
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Bounding box in frame pixel coordinates.
    pub rect: Rect,
    /// Detector confidence in [0, 1].
    pub confidence: f32,
    /// Class index, semantics defined by the detection model.
    pub class_id: u32,
}

impl Detection {
    /// Create a detection from TLBR corners, validating the box ordering and
    /// confidence range.
    pub fn new(
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        confidence: f32,
        class_id: u32,
    ) -> Result<Self, DetectionError> {
        if !(x1 < x2 && y1 < y2) {
            return Err(DetectionError::InvalidBox { x1, y1, x2, y2 });
        }
        if !(0.0..=1.0).contains(&confidence) {
            return Err(DetectionError::InvalidConfidence(confidence));
        }
        Ok(Self {
            rect: Rect::from_tlbr(x1, y1, x2, y2),
            confidence,
            class_id,
        })
    }

    #[inline]
    pub fn centroid(&self) -> (f32, f32) {
        self.rect.centroid()
    }
}

/// A detection augmented with the identity the binder assigned to it.
///
/// `track_id` is `None` when no live track was within matching distance.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedDetection {
    pub detection: Detection,
    pub track_id: Option<u64>,
}

/// Builder for creating `Detection` objects from various input formats.
#[derive(Debug, Clone, Default)]
pub struct DetectionBuilder {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    confidence: f32,
    class_id: u32,
}

impl DetectionBuilder {
    /// Create a new detection builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set bounding box in TLBR format (x1, y1, x2, y2).
    pub fn tlbr(mut self, x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        self.x1 = x1;
        self.y1 = y1;
        self.x2 = x2;
        self.y2 = y2;
        self
    }

    /// Set bounding box in XYWH format (center_x, center_y, width, height).
    pub fn xywh(mut self, cx: f32, cy: f32, w: f32, h: f32) -> Self {
        self.x1 = cx - w / 2.0;
        self.y1 = cy - h / 2.0;
        self.x2 = cx + w / 2.0;
        self.y2 = cy + h / 2.0;
        self
    }

    /// Set bounding box in TLWH format (top, left, width, height).
    pub fn tlwh(mut self, t: f32, l: f32, w: f32, h: f32) -> Self {
        self.x1 = l;
        self.y1 = t;
        self.x2 = l + w;
        self.y2 = t + h;
        self
    }

    /// Set the confidence score.
    pub fn confidence(mut self, confidence: f32) -> Self {
        self.confidence = confidence;
        self
    }

    /// Set the class index.
    pub fn class_id(mut self, class_id: u32) -> Self {
        self.class_id = class_id;
        self
    }

    /// Build the final `Detection`, validating its invariants.
    pub fn build(self) -> Result<Detection, DetectionError> {
        Detection::new(
            self.x1,
            self.y1,
            self.x2,
            self.y2,
            self.confidence,
            self.class_id,
        )
    }
}
