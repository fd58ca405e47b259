use crate::algorithm::kmeans_best_of;
use crate::clustering::Clusterer;
use crate::config::KMeansConfig;
use crate::distance::assign_nearest;
use crate::error::ClusterCraftError;
use ndarray::{Array1, Array2, ArrayView2};

/// k-means clustering over survey answer vectors.
///
/// Seeds centroids with k-means++, refines them with Lloyd iterations and keeps the
/// best of several restarts. This is the clustering routine [`cluster`](crate::cluster)
/// uses unless another [`Clusterer`] is injected.
///
/// # Example
///
/// ```
/// use clustercraft::{KMeans, KMeansConfig};
/// use ndarray::array;
///
/// let answers = array![[1.0, 1.0], [1.0, 2.0], [5.0, 5.0], [5.0, 4.0]];
///
/// let mut kmeans = KMeans::with_config(KMeansConfig::default().with_seed(42));
/// let labels = kmeans.fit_predict(&answers.view(), 2).unwrap();
///
/// assert_eq!(labels[0], labels[1]);
/// assert_ne!(labels[0], labels[2]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct KMeans {
    /// Model configuration
    config: KMeansConfig,

    /// Trained centroids (None if not yet fitted)
    centroids: Option<Array2<f64>>,

    /// Inertia of the retained fit
    inertia: Option<f64>,
}

impl KMeans {
    /// Create a k-means model with a custom configuration.
    pub fn with_config(config: KMeansConfig) -> Self {
        Self {
            config,
            centroids: None,
            inertia: None,
        }
    }

    /// Fit `k` centroids to the data, replacing any previous fit.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The data has no rows
    /// - `k` is zero or larger than the number of rows
    pub fn fit(
        &mut self,
        data: &ArrayView2<f64>,
        k: usize,
    ) -> Result<&mut Self, ClusterCraftError> {
        self.fit_labels(data, k)?;
        Ok(self)
    }

    /// Assign each row to its nearest fitted centroid.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The model has not been fitted yet
    /// - Data dimensions don't match the training data
    pub fn predict(&self, data: &ArrayView2<f64>) -> Result<Array1<usize>, ClusterCraftError> {
        let centroids = self.centroids.as_ref().ok_or(ClusterCraftError::NotFitted)?;

        if data.ncols() != centroids.ncols() {
            return Err(ClusterCraftError::InvalidDimensions(format!(
                "Expected {} features, got {}",
                centroids.ncols(),
                data.ncols()
            )));
        }

        let (labels, _) = assign_nearest(data, &centroids.view());
        Ok(labels)
    }

    /// Fit the model and predict cluster assignments in one call.
    pub fn fit_predict(
        &mut self,
        data: &ArrayView2<f64>,
        k: usize,
    ) -> Result<Array1<usize>, ClusterCraftError> {
        self.fit_labels(data, k)
    }

    fn fit_labels(
        &mut self,
        data: &ArrayView2<f64>,
        k: usize,
    ) -> Result<Array1<usize>, ClusterCraftError> {
        let result = kmeans_best_of(data, k, &self.config)?;
        self.centroids = Some(result.centroids);
        self.inertia = Some(result.inertia);
        Ok(result.labels)
    }

    /// Centroids of the fitted model, `None` before `fit`.
    pub fn centroids(&self) -> Option<&Array2<f64>> {
        self.centroids.as_ref()
    }

    /// Sum of squared distances to assigned centroids for the retained fit.
    pub fn inertia(&self) -> Option<f64> {
        self.inertia
    }

    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }
}

impl Clusterer for KMeans {
    fn fit_predict(
        &mut self,
        features: &ArrayView2<f64>,
        k: usize,
    ) -> Result<Vec<usize>, ClusterCraftError> {
        KMeans::fit_predict(self, features, k).map(|labels| labels.to_vec())
    }
}
