use crate::catalog::ClusterCatalog;
use crate::clustering::LabeledTable;
use crate::config::ANSWER_COUNT;
use crate::error::ClusterCraftError;
use crate::respondent::{Respondent, RespondentId};
use serde::Serialize;

/// Disclaimer shown alongside every displayed profile
pub const PROFILE_NOTE: &str = "To tylko model edukacyjny — nie jest to diagnoza psychologiczna.";

/// A respondent's record together with its cluster's name and description
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub record: Respondent,
    pub cluster_index: usize,
    pub cluster_name: String,
    pub description: String,
}

impl Profile {
    pub fn answers(&self) -> &[u8; ANSWER_COUNT] {
        &self.record.answers
    }
}

/// Find the profile of respondent `id`.
///
/// An id with no matching row yields `Ok(None)`.
///
/// # Errors
///
/// Returns `UnknownCluster` if the row's cluster is missing from `catalog`, which means
/// the table and catalog come from different clustering runs.
pub fn lookup(
    labeled: &LabeledTable,
    catalog: &ClusterCatalog,
    id: RespondentId,
) -> Result<Option<Profile>, ClusterCraftError> {
    let Some(row) = labeled.get(id) else {
        return Ok(None);
    };

    let info = catalog
        .get(row.cluster)
        .ok_or(ClusterCraftError::UnknownCluster(row.cluster))?;

    Ok(Some(Profile {
        record: row.respondent.clone(),
        cluster_index: row.cluster,
        cluster_name: info.name.clone(),
        description: info.description.clone(),
    }))
}
