use crate::catalog::{describe, ClusterCatalog};
use crate::error::ClusterCraftError;
use crate::kmeans::KMeans;
use crate::respondent::{Respondent, RespondentId, RespondentTable};
use log::info;
use ndarray::ArrayView2;
use serde::Serialize;

/// A clustering routine: one label in `0..k` per input row, in input order.
pub trait Clusterer {
    fn fit_predict(
        &mut self,
        features: &ArrayView2<f64>,
        k: usize,
    ) -> Result<Vec<usize>, ClusterCraftError>;
}

/// A respondent together with its cluster assignment
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabeledRespondent {
    #[serde(flatten)]
    pub respondent: Respondent,
    pub cluster: usize,
}

/// Respondent table joined row-for-row with cluster assignments
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LabeledTable {
    rows: Vec<LabeledRespondent>,
}

impl LabeledTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LabeledRespondent> {
        self.rows.iter()
    }

    pub fn rows(&self) -> &[LabeledRespondent] {
        &self.rows
    }

    /// First `n` rows, for previews
    pub fn head(&self, n: usize) -> &[LabeledRespondent] {
        &self.rows[..n.min(self.rows.len())]
    }

    pub fn get(&self, id: RespondentId) -> Option<&LabeledRespondent> {
        self.rows.iter().find(|row| row.respondent.id == id)
    }

    /// Distinct cluster indices carried by at least one row, ascending
    pub fn cluster_indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.rows.iter().map(|row| row.cluster).collect();
        indices.sort_unstable();
        indices.dedup();
        indices
    }

    /// Rows assigned to `cluster`, in table order
    pub fn members(&self, cluster: usize) -> impl Iterator<Item = &LabeledRespondent> {
        self.rows.iter().filter(move |row| row.cluster == cluster)
    }
}

impl<'a> IntoIterator for &'a LabeledTable {
    type Item = &'a LabeledRespondent;
    type IntoIter = std::slice::Iter<'a, LabeledRespondent>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

/// Labeled table and catalog produced by one clustering run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusteringRun {
    pub k: usize,
    pub labeled: LabeledTable,
    pub catalog: ClusterCatalog,
}

/// Cluster the respondents into `k` groups with the built-in k-means routine.
///
/// # Errors
///
/// Returns an error if:
/// - The table is empty
/// - `k` is below 2 or above the number of respondents
pub fn cluster(
    table: &RespondentTable,
    k: usize,
) -> Result<(LabeledTable, ClusterCatalog), ClusterCraftError> {
    cluster_with(table, k, &mut KMeans::default())
}

/// Cluster the respondents into `k` groups with the given routine.
///
/// Only the five answers are used as features. Labels are joined back by row
/// position, so the output keeps the input order and row count.
pub fn cluster_with<C>(
    table: &RespondentTable,
    k: usize,
    clusterer: &mut C,
) -> Result<(LabeledTable, ClusterCatalog), ClusterCraftError>
where
    C: Clusterer + ?Sized,
{
    let rows = table.len();

    if rows == 0 {
        return Err(ClusterCraftError::EmptyInput);
    }

    if k < 2 || k > rows {
        return Err(ClusterCraftError::InvalidClusterCount { k, rows });
    }

    let features = table.feature_matrix();
    let labels = clusterer.fit_predict(&features.view(), k)?;

    if labels.len() != rows {
        return Err(ClusterCraftError::ClusteringFailed(format!(
            "expected {} labels, got {}",
            rows,
            labels.len()
        )));
    }

    if let Some(&label) = labels.iter().find(|&&label| label >= k) {
        return Err(ClusterCraftError::ClusteringFailed(format!(
            "label {} is outside 0..{}",
            label, k
        )));
    }

    let labeled = LabeledTable {
        rows: table
            .iter()
            .zip(labels)
            .map(|(respondent, cluster)| LabeledRespondent {
                respondent: respondent.clone(),
                cluster,
            })
            .collect(),
    };

    info!(
        "clustered {} respondents into {} groups ({} non-empty)",
        rows,
        k,
        labeled.cluster_indices().len()
    );

    Ok((labeled, describe(k)))
}
