use serde::Serialize;
use std::collections::BTreeMap;

/// Archetype names handed out to clusters by index
pub const ARCHETYPE_NAMES: [&str; 8] = [
    "Innowatorzy",
    "Analitycy",
    "Eksploratorzy",
    "Mediatorzy",
    "Stabilizatorzy",
    "Twórcy Adaptacyjni",
    "Systemowcy",
    "Wizjonerzy",
];

const DESCRIPTION_SUFFIX: &str =
    ": a group characterized by a distinctive response style and a coherent trait profile.";

/// Display name and description of one cluster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClusterInfo {
    pub name: String,
    pub description: String,
}

/// Names and descriptions for cluster indices `0..k`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ClusterCatalog {
    entries: BTreeMap<usize, ClusterInfo>,
}

impl ClusterCatalog {
    pub fn get(&self, index: usize) -> Option<&ClusterInfo> {
        self.entries.get(&index)
    }

    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending index order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &ClusterInfo)> {
        self.entries.iter().map(|(&index, info)| (index, info))
    }
}

/// Name for a cluster index: an archetype for the first eight, `Cluster <index>` after that.
pub fn cluster_name(index: usize) -> String {
    ARCHETYPE_NAMES
        .get(index)
        .map(|name| name.to_string())
        .unwrap_or_else(|| format!("Cluster {}", index))
}

/// Description for a cluster name.
///
/// The text is decorative: it is built from the name alone and says nothing about the
/// answers of the cluster's members.
pub fn cluster_description(name: &str) -> String {
    format!("{}{}", name, DESCRIPTION_SUFFIX)
}

/// Build the catalog for `k` clusters.
///
/// # Example
///
/// ```
/// let catalog = clustercraft::describe(3);
/// assert_eq!(catalog.get(1).unwrap().name, "Analitycy");
/// assert!(catalog.get(3).is_none());
/// ```
pub fn describe(k: usize) -> ClusterCatalog {
    let entries = (0..k)
        .map(|index| {
            let name = cluster_name(index);
            let description = cluster_description(&name);
            (index, ClusterInfo { name, description })
        })
        .collect();

    ClusterCatalog { entries }
}
