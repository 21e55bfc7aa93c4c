//! Greedy nearest-neighbor assignment between tracks and detections.

use ndarray::Array2;

/// Outcome of one assignment round.
///
/// Indices are row (track) and column (detection) positions in the cost
/// matrix, not track IDs.
#[derive(Debug, Clone)]
pub struct AssignmentResult {
    pub matches: Vec<(usize, usize)>,
    pub unmatched_tracks: Vec<usize>,
    pub unmatched_detections: Vec<usize>,
}

/// Greedily pair rows (existing tracks) with columns (incoming detections).
///
/// Rows are visited in ascending order of their minimum distance, ties broken
/// by original row order. Each row's candidate is its globally closest
/// column; the pair is dropped if that column was already consumed by an
/// earlier row or the distance exceeds `max_distance`. This is a fast
/// approximation, not a minimum-cost bipartite matching: a row whose closest
/// column is taken stays unmatched rather than falling back to its
/// second-best column.
pub fn greedy_assignment(cost_matrix: &Array2<f32>, max_distance: f32) -> AssignmentResult {
    let (num_rows, num_cols) = cost_matrix.dim();

    if num_rows == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_tracks: vec![],
            unmatched_detections: (0..num_cols).collect(),
        };
    }

    if num_cols == 0 {
        return AssignmentResult {
            matches: vec![],
            unmatched_tracks: (0..num_rows).collect(),
            unmatched_detections: vec![],
        };
    }

    // For each row: the closest column and its distance.
    let mut row_best: Vec<(usize, f32, usize)> = Vec::with_capacity(num_rows);
    for row in 0..num_rows {
        let mut best_col = 0;
        let mut best_dist = cost_matrix[[row, 0]];
        for col in 1..num_cols {
            let d = cost_matrix[[row, col]];
            if d < best_dist {
                best_dist = d;
                best_col = col;
            }
        }
        row_best.push((row, best_dist, best_col));
    }

    // Stable sort keeps original row order on equal distances.
    row_best.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut matches = vec![];
    let mut used_cols = vec![false; num_cols];
    let mut matched_rows = vec![false; num_rows];

    for (row, dist, col) in row_best {
        if used_cols[col] || dist > max_distance {
            continue;
        }
        matches.push((row, col));
        matched_rows[row] = true;
        used_cols[col] = true;
    }

    let unmatched_tracks = (0..num_rows).filter(|&r| !matched_rows[r]).collect();
    let unmatched_detections = (0..num_cols).filter(|&c| !used_cols[c]).collect();

    AssignmentResult {
        matches,
        unmatched_tracks,
        unmatched_detections,
    }
}
