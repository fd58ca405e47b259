//! # clustercraft
//!
//! Survey segmentation in a few plain function calls: synthesize respondents,
//! cluster them by their answers with k-means, then browse per-cluster summaries
//! and individual profiles.
//!
//! ## Features
//!
//! - **Synthetic respondents**: `generate(n)` builds `n` records with a Polish city
//!   and five answers on a 1-5 scale
//! - **Pluggable clustering**: the built-in k-means (k-means++ seeding, restarts,
//!   rayon-parallel assignment) sits behind the [`Clusterer`] trait
//! - **Archetype catalog**: clusters are named positionally from a fixed list of
//!   eight archetypes, with generic names beyond that
//! - **Reports**: per-cluster size, rounded mean answers and top cities, plus a
//!   cross-cluster comparison table
//! - **Session**: [`AnalysisSession`] keeps a table and its clustering run together
//!   and drops the run whenever the table is regenerated
//!
//! ## Example
//!
//! ```rust
//! use clustercraft::{cluster, generate, lookup, summarize};
//!
//! let table = generate(100);
//! let (labeled, catalog) = cluster(&table, 4).unwrap();
//!
//! let summaries = summarize(&labeled, &catalog).unwrap();
//! assert_eq!(summaries.iter().map(|s| s.size).sum::<usize>(), 100);
//!
//! let profile = lookup(&labeled, &catalog, 7).unwrap().unwrap();
//! println!("{} -> {}", profile.record.city, profile.cluster_name);
//!
//! assert!(lookup(&labeled, &catalog, 999).unwrap().is_none());
//! ```
//!
//! ## Custom clustering
//!
//! ```rust
//! use clustercraft::{cluster_with, generate, ClusterCraftError, Clusterer};
//! use ndarray::ArrayView2;
//!
//! /// Splits respondents by their first answer
//! struct FirstAnswer;
//!
//! impl Clusterer for FirstAnswer {
//!     fn fit_predict(
//!         &mut self,
//!         features: &ArrayView2<f64>,
//!         k: usize,
//!     ) -> Result<Vec<usize>, ClusterCraftError> {
//!         Ok(features.rows().into_iter().map(|row| (row[0] as usize - 1) % k).collect())
//!     }
//! }
//!
//! let table = generate(40);
//! let (labeled, _catalog) = cluster_with(&table, 5, &mut FirstAnswer).unwrap();
//! assert_eq!(labeled.len(), 40);
//! ```

mod algorithm;
mod catalog;
mod clustering;
mod config;
mod distance;
mod error;
mod kmeans;
mod lookup;
mod respondent;
mod session;
mod summary;

pub use catalog::{
    cluster_description, cluster_name, describe, ClusterCatalog, ClusterInfo, ARCHETYPE_NAMES,
};
pub use clustering::{
    cluster, cluster_with, Clusterer, ClusteringRun, LabeledRespondent, LabeledTable,
};
pub use config::{
    KMeansConfig, SessionConfig, ANSWER_COUNT, ANSWER_MAX, ANSWER_MIN, DEFAULT_CLUSTERS,
    DEFAULT_RESPONDENTS, MAX_CLUSTERS, MIN_CLUSTERS, PREVIEW_ROWS, TOP_CITIES,
};
pub use error::ClusterCraftError;
pub use kmeans::KMeans;
pub use lookup::{lookup, Profile, PROFILE_NOTE};
pub use respondent::{
    generate, generate_with, CityPool, PlaceNames, Respondent, RespondentId, RespondentTable,
    POLISH_CITIES,
};
pub use session::AnalysisSession;
pub use summary::{compare, summarize, summarize_cluster, CityCount, ClusterSummary, ComparisonRow};
