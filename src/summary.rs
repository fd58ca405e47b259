use crate::catalog::{ClusterCatalog, ClusterInfo};
use crate::clustering::{LabeledRespondent, LabeledTable};
use crate::config::{ANSWER_COUNT, TOP_CITIES};
use crate::error::ClusterCraftError;
use serde::Serialize;
use std::collections::HashMap;

/// Number of respondents from one city within a cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CityCount {
    pub city: String,
    pub count: usize,
}

/// Statistics for one cluster
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterSummary {
    pub cluster_index: usize,
    pub name: String,
    pub description: String,
    pub size: usize,
    /// Mean of each answer over the members, rounded to 2 decimals
    pub mean_answers: [f64; ANSWER_COUNT],
    /// Most frequent cities, at most five
    pub top_cities: Vec<CityCount>,
}

/// One row of the cross-cluster comparison table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub cluster_index: usize,
    pub name: String,
    pub size: usize,
    pub mean_answers: [f64; ANSWER_COUNT],
}

impl From<ClusterSummary> for ComparisonRow {
    fn from(summary: ClusterSummary) -> Self {
        Self {
            cluster_index: summary.cluster_index,
            name: summary.name,
            size: summary.size,
            mean_answers: summary.mean_answers,
        }
    }
}

/// Summarize every cluster that has at least one member, ascending by index.
///
/// # Errors
///
/// Returns `UnknownCluster` if a row carries an index the catalog does not know.
pub fn summarize(
    labeled: &LabeledTable,
    catalog: &ClusterCatalog,
) -> Result<Vec<ClusterSummary>, ClusterCraftError> {
    labeled
        .cluster_indices()
        .into_iter()
        .map(|index| {
            let info = catalog
                .get(index)
                .ok_or(ClusterCraftError::UnknownCluster(index))?;
            let members: Vec<&LabeledRespondent> = labeled.members(index).collect();
            Ok(build_summary(index, info, &members))
        })
        .collect()
}

/// Summarize a single cluster.
///
/// Returns `Ok(None)` when the catalog knows `index` but no row was assigned to it.
pub fn summarize_cluster(
    labeled: &LabeledTable,
    catalog: &ClusterCatalog,
    index: usize,
) -> Result<Option<ClusterSummary>, ClusterCraftError> {
    let info = catalog
        .get(index)
        .ok_or(ClusterCraftError::UnknownCluster(index))?;

    let members: Vec<&LabeledRespondent> = labeled.members(index).collect();
    if members.is_empty() {
        return Ok(None);
    }

    Ok(Some(build_summary(index, info, &members)))
}

/// One row per non-empty cluster with its name, size and mean answers.
pub fn compare(
    labeled: &LabeledTable,
    catalog: &ClusterCatalog,
) -> Result<Vec<ComparisonRow>, ClusterCraftError> {
    Ok(summarize(labeled, catalog)?
        .into_iter()
        .map(ComparisonRow::from)
        .collect())
}

fn build_summary(
    index: usize,
    info: &ClusterInfo,
    members: &[&LabeledRespondent],
) -> ClusterSummary {
    ClusterSummary {
        cluster_index: index,
        name: info.name.clone(),
        description: info.description.clone(),
        size: members.len(),
        mean_answers: mean_answers(members),
        top_cities: top_cities(members, TOP_CITIES),
    }
}

fn mean_answers(members: &[&LabeledRespondent]) -> [f64; ANSWER_COUNT] {
    let mut sums = [0u64; ANSWER_COUNT];
    for member in members {
        for (sum, &answer) in sums.iter_mut().zip(member.respondent.answers.iter()) {
            *sum += u64::from(answer);
        }
    }

    let count = members.len().max(1) as f64;
    sums.map(|sum| round2(sum as f64 / count))
}

/// City counts sorted by count descending; ties keep first-occurrence order.
fn top_cities(members: &[&LabeledRespondent], limit: usize) -> Vec<CityCount> {
    let mut counts: Vec<CityCount> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for member in members {
        let city = member.respondent.city.as_str();
        match positions.get(city) {
            Some(&pos) => counts[pos].count += 1,
            None => {
                positions.insert(city, counts.len());
                counts.push(CityCount {
                    city: city.to_string(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}

/// Round to 2 decimal places, ties to even
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
