use ndarray::{Array1, ArrayView1, ArrayView2};
use rayon::prelude::*;

/// Squared L2 distance between two rows
#[inline]
pub fn squared_distance(a: &ArrayView1<f64>, b: &ArrayView1<f64>) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// Find the nearest centroid for each data point.
///
/// Rows are processed in parallel. Ties go to the centroid with the lowest index.
///
/// # Returns
/// * `labels` - Cluster assignment for each data point (n_data,)
/// * `distances` - Squared distance to the assigned centroid (n_data,)
pub fn assign_nearest(
    data: &ArrayView2<f64>,
    centroids: &ArrayView2<f64>,
) -> (Array1<usize>, Array1<f64>) {
    let pairs: Vec<(usize, f64)> = (0..data.nrows())
        .into_par_iter()
        .map(|i| nearest_centroid(&data.row(i), centroids))
        .collect();

    let (labels, distances): (Vec<usize>, Vec<f64>) = pairs.into_iter().unzip();
    (Array1::from(labels), Array1::from(distances))
}

/// Index of and squared distance to the centroid closest to `point`
pub fn nearest_centroid(point: &ArrayView1<f64>, centroids: &ArrayView2<f64>) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (j, centroid) in centroids.outer_iter().enumerate() {
        let dist = squared_distance(point, &centroid);
        if dist < best.1 {
            best = (j, dist);
        }
    }
    best
}

/// Compute centroid shift (sum of L2 norms of centroid movements)
pub fn centroid_shift(old_centroids: &ArrayView2<f64>, new_centroids: &ArrayView2<f64>) -> f64 {
    old_centroids
        .outer_iter()
        .zip(new_centroids.outer_iter())
        .map(|(old_c, new_c)| squared_distance(&old_c, &new_c).sqrt())
        .sum()
}
