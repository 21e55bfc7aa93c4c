/// Bounding box representation with format conversion utilities.
///
/// Supports the two box formats used by detection backends:
/// - TLWH: Top-Left X, Top-Left Y, Width, Height
/// - TLBR: Top-Left X, Top-Left Y, Bottom-Right X, Bottom-Right Y
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Top-left x coordinate
    pub x: f32,
    /// Top-left y coordinate
    pub y: f32,
    /// Width of the bounding box
    pub width: f32,
    /// Height of the bounding box
    pub height: f32,
}

impl Rect {
    /// Create a new Rect from top-left coordinates and dimensions (TLWH format).
    #[inline]
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: x1,
            y: y1,
            width: x2 - x1,
            height: y2 - y1,
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x, self.y, self.x + self.width, self.y + self.height]
    }

    /// Convert to TLWH format: (x, y, width, height).
    #[inline]
    pub fn to_tlwh(&self) -> [f32; 4] {
        [self.x, self.y, self.width, self.height]
    }

    /// Get the centroid of the bounding box.
    ///
    /// Total for any box, including degenerate zero-area ones.
    #[inline]
    pub fn centroid(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Get the area of the bounding box.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Euclidean distance between two points.
#[inline]
pub fn point_distance(a: (f32, f32), b: (f32, f32)) -> f32 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    (dx * dx + dy * dy).sqrt()
}

use ndarray::Array2;

/// Calculate the pairwise Euclidean distance matrix between two point sets.
///
/// Returns a matrix of shape (M, N) where M is the length of `points_a`
/// and N is the length of `points_b`.
pub fn distance_matrix(points_a: &[(f32, f32)], points_b: &[(f32, f32)]) -> Array2<f32> {
    let mut dists = Array2::zeros((points_a.len(), points_b.len()));
    for (i, a) in points_a.iter().enumerate() {
        for (j, b) in points_b.iter().enumerate() {
            dists[[i, j]] = point_distance(*a, *b);
        }
    }
    dists
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_conversions() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);

        // TLWH
        assert_eq!(rect.to_tlwh(), [10.0, 20.0, 30.0, 40.0]);

        // TLBR
        assert_eq!(rect.to_tlbr(), [10.0, 20.0, 40.0, 60.0]);
    }

    #[test]
    fn test_from_tlbr() {
        let rect = Rect::from_tlbr(10.0, 20.0, 40.0, 60.0);
        assert_eq!(rect.to_tlwh(), [10.0, 20.0, 30.0, 40.0]);
    }

    #[test]
    fn test_centroid() {
        let rect = Rect::from_tlbr(10.0, 10.0, 20.0, 20.0);
        assert_eq!(rect.centroid(), (15.0, 15.0));
    }

    #[test]
    fn test_centroid_degenerate() {
        let rect = Rect::from_tlbr(5.0, 5.0, 5.0, 5.0);
        assert_eq!(rect.area(), 0.0);
        assert_eq!(rect.centroid(), (5.0, 5.0));
    }

    #[test]
    fn test_point_distance() {
        assert!((point_distance((0.0, 0.0), (3.0, 4.0)) - 5.0).abs() < 1e-6);
        assert_eq!(point_distance((1.0, 1.0), (1.0, 1.0)), 0.0);
    }

    #[test]
    fn test_distance_matrix() {
        let a = [(0.0, 0.0), (10.0, 0.0)];
        let b = [(0.0, 0.0), (0.0, 5.0), (10.0, 0.0)];
        let d = distance_matrix(&a, &b);

        assert_eq!(d.dim(), (2, 3));
        assert_eq!(d[[0, 0]], 0.0);
        assert_eq!(d[[0, 1]], 5.0);
        assert_eq!(d[[0, 2]], 10.0);
        assert_eq!(d[[1, 2]], 0.0);
    }
}
