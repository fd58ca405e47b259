use crate::clustering::{cluster_with, Clusterer, ClusteringRun};
use crate::config::SessionConfig;
use crate::error::ClusterCraftError;
use crate::kmeans::KMeans;
use crate::lookup::{lookup, Profile};
use crate::respondent::{generate_with, CityPool, RespondentId, RespondentTable};
use crate::summary::{compare, summarize, ClusterSummary, ComparisonRow};
use log::info;

/// Caller-owned analysis state: at most one respondent table and at most one
/// clustering run computed from it.
///
/// Regenerating the table drops the clustering run, so reports and profiles always
/// describe the current respondents.
///
/// # Example
///
/// ```
/// use clustercraft::{AnalysisSession, KMeansConfig, SessionConfig};
///
/// let config = SessionConfig::default().with_kmeans(KMeansConfig::default().with_seed(1));
/// let mut session = AnalysisSession::new(config);
///
/// session.generate();
/// session.cluster(4).unwrap();
///
/// let sizes: usize = session.report().unwrap().iter().map(|s| s.size).sum();
/// assert_eq!(sizes, 100);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AnalysisSession {
    config: SessionConfig,
    table: Option<RespondentTable>,
    run: Option<ClusteringRun>,
}

impl AnalysisSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            table: None,
            run: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current respondent table, if one was generated
    pub fn table(&self) -> Option<&RespondentTable> {
        self.table.as_ref()
    }

    /// Most recent successful clustering run for the current table
    pub fn run(&self) -> Option<&ClusteringRun> {
        self.run.as_ref()
    }

    /// Generate a fresh table of `config.respondents` respondents, dropping any previous
    /// table and clustering run.
    pub fn generate(&mut self) -> &RespondentTable {
        let table = generate_with(
            self.config.respondents,
            &mut rand::thread_rng(),
            &mut CityPool::polish(),
        );
        self.set_table(table)
    }

    /// Install a caller-built table, dropping any previous table and clustering run.
    ///
    /// Ids are unique by construction of [`RespondentTable`].
    pub fn set_table(&mut self, table: RespondentTable) -> &RespondentTable {
        info!("new respondent table with {} rows", table.len());
        self.run = None;
        &*self.table.insert(table)
    }

    /// Cluster the current table with the configured cluster count.
    pub fn cluster_default(&mut self) -> Result<&ClusteringRun, ClusterCraftError> {
        self.cluster(self.config.clusters)
    }

    /// Cluster the current table into `k` groups with the built-in k-means routine.
    pub fn cluster(&mut self, k: usize) -> Result<&ClusteringRun, ClusterCraftError> {
        let mut kmeans = KMeans::with_config(self.config.kmeans.clone());
        self.cluster_with(k, &mut kmeans)
    }

    /// Cluster the current table with the given routine.
    ///
    /// On failure the previous clustering run is kept.
    pub fn cluster_with<C>(
        &mut self,
        k: usize,
        clusterer: &mut C,
    ) -> Result<&ClusteringRun, ClusterCraftError>
    where
        C: Clusterer + ?Sized,
    {
        let table = self.table.as_ref().ok_or(ClusterCraftError::EmptyInput)?;
        let (labeled, catalog) = cluster_with(table, k, clusterer)?;

        let run = self.run.insert(ClusteringRun {
            k,
            labeled,
            catalog,
        });
        Ok(&*run)
    }

    /// Per-cluster summaries of the current run
    pub fn report(&self) -> Result<Vec<ClusterSummary>, ClusterCraftError> {
        let run = self.current_run()?;
        summarize(&run.labeled, &run.catalog)
    }

    /// Cross-cluster comparison table of the current run
    pub fn comparison(&self) -> Result<Vec<ComparisonRow>, ClusterCraftError> {
        let run = self.current_run()?;
        compare(&run.labeled, &run.catalog)
    }

    /// Profile of respondent `id` in the current run, `Ok(None)` if there is no such id
    pub fn profile(&self, id: RespondentId) -> Result<Option<Profile>, ClusterCraftError> {
        let run = self.current_run()?;
        lookup(&run.labeled, &run.catalog, id)
    }

    fn current_run(&self) -> Result<&ClusteringRun, ClusterCraftError> {
        self.run.as_ref().ok_or(ClusterCraftError::NotClustered)
    }
}
