/// Number of respondents generated when the caller does not say otherwise
pub const DEFAULT_RESPONDENTS: usize = 100;

/// Cluster count preselected by the front end
pub const DEFAULT_CLUSTERS: usize = 4;

/// Smallest cluster count offered to users
pub const MIN_CLUSTERS: usize = 2;

/// Largest cluster count offered to users (one per archetype name)
pub const MAX_CLUSTERS: usize = 8;

/// Number of survey questions per respondent
pub const ANSWER_COUNT: usize = 5;

/// Lowest possible answer on the survey scale
pub const ANSWER_MIN: u8 = 1;

/// Highest possible answer on the survey scale
pub const ANSWER_MAX: u8 = 5;

/// Number of cities listed per cluster summary
pub const TOP_CITIES: usize = 5;

/// Number of rows shown in table previews
pub const PREVIEW_ROWS: usize = 10;

/// Configuration for the built-in k-means routine
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansConfig {
    /// Maximum number of Lloyd iterations per restart
    pub max_iters: usize,

    /// Convergence tolerance. When the total centroid shift is below this threshold,
    /// a restart stops early. Set to a negative value to disable early stopping.
    pub tol: f64,

    /// Number of independent restarts; the one with the lowest inertia wins
    pub n_init: usize,

    /// Random seed for centroid seeding. `None` draws a fresh seed from the OS,
    /// so repeated runs may return different (isomorphic) partitions.
    pub seed: Option<u64>,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            max_iters: 300,
            tol: 1e-4,
            n_init: 10,
            seed: None,
        }
    }
}

impl KMeansConfig {
    /// Set the maximum number of iterations
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Set the convergence tolerance
    pub fn with_tol(mut self, tol: f64) -> Self {
        self.tol = tol;
        self
    }

    /// Set the number of restarts (at least one restart always runs)
    pub fn with_n_init(mut self, n_init: usize) -> Self {
        self.n_init = n_init;
        self
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Configuration for an [`AnalysisSession`](crate::AnalysisSession)
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    /// How many respondents `generate()` produces
    pub respondents: usize,

    /// Cluster count used by `cluster_default()`
    pub clusters: usize,

    /// Settings for the built-in k-means routine
    pub kmeans: KMeansConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            respondents: DEFAULT_RESPONDENTS,
            clusters: DEFAULT_CLUSTERS,
            kmeans: KMeansConfig::default(),
        }
    }
}

impl SessionConfig {
    /// Set the number of generated respondents
    pub fn with_respondents(mut self, respondents: usize) -> Self {
        self.respondents = respondents;
        self
    }

    /// Set the default cluster count
    pub fn with_clusters(mut self, clusters: usize) -> Self {
        self.clusters = clusters;
        self
    }

    /// Set the k-means settings
    pub fn with_kmeans(mut self, kmeans: KMeansConfig) -> Self {
        self.kmeans = kmeans;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.respondents, 100);
        assert_eq!(config.clusters, 4);
        assert!(config.kmeans.seed.is_none());
    }

    #[test]
    fn test_builders_chain() {
        let config = SessionConfig::default()
            .with_respondents(40)
            .with_clusters(3)
            .with_kmeans(KMeansConfig::default().with_seed(7).with_n_init(2));

        assert_eq!(config.respondents, 40);
        assert_eq!(config.clusters, 3);
        assert_eq!(config.kmeans.seed, Some(7));
        assert_eq!(config.kmeans.n_init, 2);
    }
}
