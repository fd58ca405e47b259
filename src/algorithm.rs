use crate::config::KMeansConfig;
use crate::distance::{assign_nearest, centroid_shift, squared_distance};
use crate::error::ClusterCraftError;
use log::{debug, warn};
use ndarray::{Array1, Array2, ArrayView2};
use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

/// Result of one k-means fit
#[derive(Debug, Clone)]
pub struct KMeansResult {
    pub centroids: Array2<f64>,
    pub labels: Array1<usize>,
    pub inertia: f64,
    pub n_iterations: usize,
}

/// Run k-means `config.n_init` times and keep the partition with the lowest inertia.
pub fn kmeans_best_of(
    data: &ArrayView2<f64>,
    k: usize,
    config: &KMeansConfig,
) -> Result<KMeansResult, ClusterCraftError> {
    let n_samples = data.nrows();

    if n_samples == 0 {
        return Err(ClusterCraftError::EmptyInput);
    }

    if k == 0 || n_samples < k {
        return Err(ClusterCraftError::InvalidClusterCount { k, rows: n_samples });
    }

    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let n_init = config.n_init.max(1);
    let mut best: Option<KMeansResult> = None;

    for restart in 0..n_init {
        let start = Instant::now();
        let result = kmeans_single(data, k, config, &mut rng);

        debug!(
            "k-means restart {}/{}: inertia = {:.4}, {} iterations, {:.4}s",
            restart + 1,
            n_init,
            result.inertia,
            result.n_iterations,
            start.elapsed().as_secs_f64()
        );

        if best.as_ref().map_or(true, |b| result.inertia < b.inertia) {
            best = Some(result);
        }
    }

    best.ok_or_else(|| ClusterCraftError::ClusteringFailed("no restart completed".to_string()))
}

/// One k-means++ seeded run of Lloyd's algorithm.
///
/// Callers guarantee `1 <= k <= data.nrows()`.
fn kmeans_single<R: Rng + ?Sized>(
    data: &ArrayView2<f64>,
    k: usize,
    config: &KMeansConfig,
    rng: &mut R,
) -> KMeansResult {
    let n_samples = data.nrows();
    let n_features = data.ncols();

    let mut centroids = initialize_centroids(data, k, rng);
    let mut n_iterations = 0;

    for iteration in 0..config.max_iters {
        n_iterations = iteration + 1;

        let (labels, _) = assign_nearest(data, &centroids.view());

        let mut cluster_sums: Array2<f64> = Array2::zeros((k, n_features));
        let mut cluster_counts = vec![0usize; k];
        for (row, &label) in data.outer_iter().zip(labels.iter()) {
            let mut sum = cluster_sums.row_mut(label);
            sum += &row;
            cluster_counts[label] += 1;
        }

        let prev_centroids = centroids.clone();
        for (cluster_idx, &count) in cluster_counts.iter().enumerate() {
            if count > 0 {
                let mean = cluster_sums.row(cluster_idx).mapv(|v| v / count as f64);
                centroids.row_mut(cluster_idx).assign(&mean);
            } else {
                let data_idx = rng.gen_range(0..n_samples);
                centroids.row_mut(cluster_idx).assign(&data.row(data_idx));
                warn!(
                    "cluster {} lost all its points, reseeded from row {}",
                    cluster_idx, data_idx
                );
            }
        }

        let shift = centroid_shift(&prev_centroids.view(), &centroids.view());
        debug!(
            "  iteration {}/{}: shift = {:.6}",
            iteration + 1,
            config.max_iters,
            shift
        );

        if config.tol >= 0.0 && shift < config.tol {
            debug!(
                "  converged after {} iterations (shift {:.6} < tol {:.6})",
                iteration + 1,
                shift,
                config.tol
            );
            break;
        }
    }

    let (labels, distances) = assign_nearest(data, &centroids.view());

    KMeansResult {
        centroids,
        labels,
        inertia: distances.sum(),
        n_iterations,
    }
}

/// k-means++ seeding: each new centroid is a data point sampled with probability
/// proportional to its squared distance from the nearest centroid chosen so far.
fn initialize_centroids<R: Rng + ?Sized>(
    data: &ArrayView2<f64>,
    k: usize,
    rng: &mut R,
) -> Array2<f64> {
    let n_samples = data.nrows();
    let mut centroids = Array2::zeros((k, data.ncols()));

    let first = rng.gen_range(0..n_samples);
    centroids.row_mut(0).assign(&data.row(first));

    let mut closest = Array1::from_iter(
        data.outer_iter()
            .map(|row| squared_distance(&row, &data.row(first))),
    );

    for centroid_idx in 1..k {
        // All weights are zero when every point coincides with a chosen centroid
        let data_idx = match WeightedIndex::<f64>::new(closest.iter()) {
            Ok(weights) => weights.sample(rng),
            Err(_) => rng.gen_range(0..n_samples),
        };
        centroids.row_mut(centroid_idx).assign(&data.row(data_idx));

        let chosen = data.row(data_idx);
        for (dist, row) in closest.iter_mut().zip(data.outer_iter()) {
            *dist = dist.min(squared_distance(&row, &chosen));
        }
    }

    centroids
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;

    #[test]
    fn test_initialize_centroids_picks_data_points() {
        let data = array![[1.0, 1.0], [2.0, 2.0], [9.0, 9.0], [8.0, 8.0]];
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let centroids = initialize_centroids(&data.view(), 3, &mut rng);

        assert_eq!(centroids.dim(), (3, 2));
        for centroid in centroids.outer_iter() {
            assert!(data.outer_iter().any(|row| row == centroid));
        }
    }

    #[test]
    fn test_initialize_centroids_identical_points() {
        let data = Array2::from_elem((6, 5), 3.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let centroids = initialize_centroids(&data.view(), 3, &mut rng);

        assert!(centroids.iter().all(|&v| v == 3.0));
    }

    #[test]
    fn test_kmeans_basic() {
        let data = Array2::random((200, 5), Uniform::new(1.0, 5.0));
        let config = KMeansConfig::default().with_seed(42).with_n_init(3);

        let result = kmeans_best_of(&data.view(), 4, &config).unwrap();

        assert_eq!(result.centroids.dim(), (4, 5));
        assert_eq!(result.labels.len(), 200);
        assert!(result.labels.iter().all(|&label| label < 4));
        assert!(result.inertia >= 0.0);
    }

    #[test]
    fn test_kmeans_separated_groups() {
        let data = array![
            [1.0, 1.0, 1.0, 1.0, 1.0],
            [1.0, 2.0, 1.0, 1.0, 1.0],
            [5.0, 5.0, 5.0, 5.0, 5.0],
            [5.0, 4.0, 5.0, 5.0, 5.0],
        ];
        let config = KMeansConfig::default().with_seed(3);

        let result = kmeans_best_of(&data.view(), 2, &config).unwrap();

        assert_eq!(result.labels[0], result.labels[1]);
        assert_eq!(result.labels[2], result.labels[3]);
        assert_ne!(result.labels[0], result.labels[2]);
    }

    #[test]
    fn test_kmeans_rejects_too_many_clusters() {
        let data = array![[1.0, 2.0, 3.0, 4.0, 5.0]];
        let result = kmeans_best_of(&data.view(), 2, &KMeansConfig::default());
        assert!(matches!(
            result,
            Err(ClusterCraftError::InvalidClusterCount { k: 2, rows: 1 })
        ));
    }

    #[test]
    fn test_kmeans_rejects_empty_data() {
        let data: Array2<f64> = Array2::zeros((0, 5));
        let result = kmeans_best_of(&data.view(), 2, &KMeansConfig::default());
        assert!(matches!(result, Err(ClusterCraftError::EmptyInput)));
    }
}
