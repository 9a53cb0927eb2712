use ndarray::{Array1, ArrayView1, ArrayView2, Zip};
use rayon::prelude::*;

/// Squared Euclidean distance between two vectors of equal length.
///
/// The square root is skipped: nearest-centroid comparisons only need the
/// ordering, which squaring preserves.
///
/// Components must be bounded by [`MAX_FEATURE_MAGNITUDE`] for the sum to
/// stay finite; larger values overflow to `inf` and every centroid then ties.
/// [`Dataset`] enforces the bound on construction.
///
/// [`MAX_FEATURE_MAGNITUDE`]: crate::dataset::MAX_FEATURE_MAGNITUDE
/// [`Dataset`]: crate::dataset::Dataset
#[inline]
pub fn squared_euclidean(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    Zip::from(a).and(b).fold(0.0, |acc, &x, &y| {
        let d = x - y;
        acc + d * d
    })
}

/// Index of the centroid closest to `point`, with its squared distance.
///
/// Centroids are scanned in index order and only a strictly smaller distance
/// replaces the current best, so ties go to the lowest index.
#[inline]
pub fn nearest_centroid(point: &ArrayView1<f64>, centroids: &ArrayView2<f64>) -> (usize, f64) {
    let mut best_label = 0;
    let mut best_dist = f64::INFINITY;

    for (j, centroid) in centroids.outer_iter().enumerate() {
        let dist = squared_euclidean(point, &centroid);
        if dist < best_dist {
            best_dist = dist;
            best_label = j;
        }
    }

    (best_label, best_dist)
}

/// Assign every row of `data` to its nearest centroid.
///
/// Rows are processed in parallel and collected in row order.
///
/// # Returns
/// * `labels` - Cluster assignment for each row (n_samples,)
/// * `inertia` - Sum of squared distances from each row to its centroid
pub fn assign_nearest(data: &ArrayView2<f64>, centroids: &ArrayView2<f64>) -> (Array1<usize>, f64) {
    let nearest: Vec<(usize, f64)> = (0..data.nrows())
        .into_par_iter()
        .map(|i| nearest_centroid(&data.row(i), centroids))
        .collect();

    let inertia: f64 = nearest.iter().map(|&(_, dist)| dist).sum();
    let labels: Array1<usize> = nearest.into_iter().map(|(label, _)| label).collect();

    (labels, inertia)
}

/// Largest absolute component change between two centroid sets of equal shape.
///
/// A NaN component counts as an infinite shift, so it never passes a
/// tolerance check.
pub fn max_centroid_shift(old_centroids: &ArrayView2<f64>, new_centroids: &ArrayView2<f64>) -> f64 {
    Zip::from(old_centroids)
        .and(new_centroids)
        .fold(0.0, |acc: f64, &old, &new| {
            let d = (new - old).abs();
            if d.is_nan() {
                f64::INFINITY
            } else {
                acc.max(d)
            }
        })
}
