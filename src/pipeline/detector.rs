//! Trait for object detection inference backends.

use crate::pipeline::detection::Detection;

/// One decoded video frame.
///
/// The pixel layout is a contract between the frame source and the detection
/// backend; the pipeline never inspects the buffer.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw pixel bytes.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Frame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            data,
            width,
            height,
        }
    }
}

/// Trait for object detection inference backends.
///
/// Implement this to connect any detection model to the tracking pipeline.
/// The pipeline treats `detect` as an opaque, potentially slow, synchronous
/// call; a returned error costs only that frame (the pipeline skips tracking
/// for it and moves on).
///
/// # Example
///
/// ```ignore
/// use packtrack::{Detection, DetectionSource, Frame};
///
/// struct MyDetector {
///     // Your model here
/// }
///
/// impl DetectionSource for MyDetector {
///     type Error = std::io::Error;
///
///     fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Self::Error> {
///         // Run inference and return detections
///         Ok(vec![])
///     }
/// }
/// ```
pub trait DetectionSource {
    /// Error type for detection failures.
    type Error;

    /// Run inference on a frame and return detections.
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Detection>, Self::Error>;
}
