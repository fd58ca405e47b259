use thiserror::Error;

/// Error types for the clustercraft library
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClusterCraftError {
    /// The requested number of clusters cannot be formed from the available rows
    #[error("Invalid cluster count: k = {k} (need 2 <= k <= {rows} rows)")]
    InvalidClusterCount { k: usize, rows: usize },

    /// Two respondents in one table share an id
    #[error("Duplicate respondent id: {0}")]
    DuplicateRespondent(usize),

    /// There are no respondents to work on
    #[error("Empty input: there are no respondents to cluster")]
    EmptyInput,

    /// The catalog has no entry for a cluster index
    #[error("Unknown cluster index: {0}")]
    UnknownCluster(usize),

    /// A session was queried before any clustering run succeeded
    #[error("No clustering results yet. Run clustering first.")]
    NotClustered,

    /// Model has not been fitted yet
    #[error("Model has not been fitted. Call fit() first.")]
    NotFitted,

    /// Dimension mismatch between data and model
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),

    /// The clustering routine returned labels that break its contract
    #[error("Clustering failed: {0}")]
    ClusteringFailed(String),
}
