//! Region-of-interest polygon, loaded from the ROI authoring tool's JSON.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum RoiError {
    #[error("failed to read ROI file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed ROI document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("ROI polygon has {0} points, need at least 3")]
    TooFewPoints(usize),
}

#[derive(Debug, Deserialize)]
struct RoiDocument {
    roi: RoiSection,
}

#[derive(Debug, Deserialize)]
struct RoiSection {
    points: Vec<[f32; 2]>,
    #[serde(rename = "type")]
    kind: String,
    // Written by the authoring tool; points.len() is authoritative.
    #[serde(default)]
    #[allow(dead_code)]
    points_count: Option<usize>,
}

/// A simple polygon defining where detections are considered valid.
///
/// Immutable once loaded. Absence of an ROI means every detection is
/// accepted; the pipeline models that as `Option<Roi>`, not as a degenerate
/// polygon. The containment test assumes a simple (non-self-intersecting)
/// polygon; that is the authoring tool's contract, checked nowhere per frame.
#[derive(Debug, Clone)]
pub struct Roi {
    points: Vec<(f32, f32)>,
    kind: String,
}

impl Roi {
    pub fn new(points: Vec<(f32, f32)>, kind: impl Into<String>) -> Result<Self, RoiError> {
        if points.len() < 3 {
            return Err(RoiError::TooFewPoints(points.len()));
        }
        Ok(Self {
            points,
            kind: kind.into(),
        })
    }

    /// Parse an ROI from the authoring tool's JSON document:
    /// `{ "roi": { "points": [[x, y], ...], "type": "..." } }`.
    /// Unknown fields are ignored.
    pub fn from_json_str(json: &str) -> Result<Self, RoiError> {
        let doc: RoiDocument = serde_json::from_str(json)?;
        let points = doc.roi.points.iter().map(|p| (p[0], p[1])).collect();
        Self::new(points, doc.roi.kind)
    }

    /// Load an ROI document from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RoiError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load an ROI, degrading to `None` (accept-all) with a warning on any
    /// failure. ROI problems are configuration errors and never fatal.
    pub fn load_lenient(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(roi) => Some(roi),
            Err(err) => {
                warn!(path = %path.display(), %err, "ROI unavailable, accepting all detections");
                None
            }
        }
    }

    /// Boundary-inclusive point-in-polygon test.
    ///
    /// Points on an edge or vertex count as inside. Correct for non-convex
    /// simple polygons.
    pub fn contains(&self, point: (f32, f32)) -> bool {
        let n = self.points.len();
        for i in 0..n {
            if on_segment(self.points[i], self.points[(i + 1) % n], point) {
                return true;
            }
        }

        // Even-odd ray casting.
        let (px, py) = point;
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (xi, yi) = self.points[i];
            let (xj, yj) = self.points[j];
            if (yi > py) != (yj > py) {
                let x_cross = (xj - xi) * (py - yi) / (yj - yi) + xi;
                if px < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    pub fn points(&self) -> &[(f32, f32)] {
        &self.points
    }

    /// The authoring tool's type label (e.g. "polygon").
    pub fn kind(&self) -> &str {
        &self.kind
    }
}

fn on_segment(a: (f32, f32), b: (f32, f32), p: (f32, f32)) -> bool {
    let cross = (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0);
    if cross.abs() > 1e-3 {
        return false;
    }
    p.0 >= a.0.min(b.0) - 1e-6
        && p.0 <= a.0.max(b.0) + 1e-6
        && p.1 >= a.1.min(b.1) - 1e-6
        && p.1 <= a.1.max(b.1) + 1e-6
}
