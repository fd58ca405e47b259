use clustercraft::{
    cluster, cluster_with, compare, describe, generate, generate_with, lookup, summarize,
    summarize_cluster, AnalysisSession, CityPool, ClusterCraftError, Clusterer, KMeans,
    KMeansConfig, Respondent, RespondentTable, SessionConfig, POLISH_CITIES,
};
use ndarray::ArrayView2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

/// Generate a reproducible table from fixed seeds
fn seeded_table(n: usize, seed: u64) -> RespondentTable {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut places = CityPool::with_rng(POLISH_CITIES, ChaCha8Rng::seed_from_u64(seed + 1));
    generate_with(n, &mut rng, &mut places)
}

fn seeded_kmeans(seed: u64) -> KMeans {
    KMeans::with_config(KMeansConfig::default().with_seed(seed))
}

/// Clustering routine that always reports the same labels
struct Fixed(Vec<usize>);

impl Clusterer for Fixed {
    fn fit_predict(
        &mut self,
        _features: &ArrayView2<f64>,
        _k: usize,
    ) -> Result<Vec<usize>, ClusterCraftError> {
        Ok(self.0.clone())
    }
}

// ============================================================================
// Generation Tests
// ============================================================================

#[test]
fn test_generate_sizes() {
    for n in [0, 1, 5, 100, 250] {
        let table = generate(n);
        assert_eq!(table.len(), n, "generate({}) should return {} rows", n, n);

        let ids: Vec<usize> = table.iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=n).collect::<Vec<_>>(), "ids should be 1..=n in order");

        for respondent in &table {
            assert!(
                respondent.answers.iter().all(|a| (1..=5).contains(a)),
                "answers should be on the 1-5 scale"
            );
        }
    }
}

#[test]
fn test_generate_fresh_each_call() {
    let first = generate(100);
    let second = generate(100);

    // 500 answers colliding by chance is practically impossible
    assert_ne!(first, second, "each call should produce a new dataset");
}

#[test]
fn test_generate_with_same_seeds_matches() {
    assert_eq!(seeded_table(60, 3), seeded_table(60, 3));
}

// ============================================================================
// Clustering Tests
// ============================================================================

#[test]
fn test_cluster_keeps_every_respondent() {
    let table = seeded_table(100, 1);

    for k in 2..=8 {
        let (labeled, catalog) = cluster_with(&table, k, &mut seeded_kmeans(k as u64)).unwrap();

        assert_eq!(labeled.len(), table.len());
        assert_eq!(catalog.len(), k);

        let ids: HashSet<usize> = labeled.iter().map(|row| row.respondent.id).collect();
        assert_eq!(ids.len(), 100, "no respondent may be dropped or duplicated");

        for (row, original) in labeled.iter().zip(table.iter()) {
            assert_eq!(&row.respondent, original, "row order must be preserved");
            assert!(row.cluster < k, "label {} out of range for k = {}", row.cluster, k);
        }
    }
}

#[test]
fn test_cluster_reproducible_with_seed() {
    let table = seeded_table(100, 5);

    let (first, _) = cluster_with(&table, 4, &mut seeded_kmeans(77)).unwrap();
    let (second, _) = cluster_with(&table, 4, &mut seeded_kmeans(77)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_cluster_groups_similar_answers() {
    let low = [1u8, 1, 2, 1, 1];
    let high = [5u8, 5, 4, 5, 5];
    let table = RespondentTable::try_from(
        (1..=20)
            .map(|id| Respondent {
                id,
                city: "Gdańsk".to_string(),
                answers: if id % 2 == 0 { low } else { high },
            })
            .collect::<Vec<_>>(),
    )
    .unwrap();

    let (labeled, _) = cluster_with(&table, 2, &mut seeded_kmeans(0)).unwrap();

    let even_cluster = labeled.get(2).unwrap().cluster;
    let odd_cluster = labeled.get(1).unwrap().cluster;
    assert_ne!(even_cluster, odd_cluster);

    for row in &labeled {
        let expected = if row.respondent.id % 2 == 0 {
            even_cluster
        } else {
            odd_cluster
        };
        assert_eq!(row.cluster, expected, "identical answers belong together");
    }
}

#[test]
fn test_cluster_one_row_two_groups() {
    let table = seeded_table(1, 9);
    assert_eq!(
        cluster(&table, 2).unwrap_err(),
        ClusterCraftError::InvalidClusterCount { k: 2, rows: 1 }
    );
}

#[test]
fn test_cluster_k_equals_rows() {
    let table = seeded_table(5, 4);
    let (labeled, _) = cluster_with(&table, 5, &mut seeded_kmeans(2)).unwrap();
    assert_eq!(labeled.len(), 5);
}

#[test]
fn test_cluster_empty_input() {
    let table = generate(0);
    assert_eq!(cluster(&table, 3).unwrap_err(), ClusterCraftError::EmptyInput);
}

// ============================================================================
// Catalog Tests
// ============================================================================

#[test]
fn test_describe_three_archetypes() {
    let catalog = describe(3);

    let expected = ["Innowatorzy", "Analitycy", "Eksploratorzy"];
    for (index, name) in expected.iter().enumerate() {
        let info = catalog.get(index).unwrap();
        assert_eq!(info.name, *name);
        assert_eq!(
            info.description,
            format!(
                "{}: a group characterized by a distinctive response style and a coherent trait profile.",
                name
            )
        );
    }
}

#[test]
fn test_descriptions_ignore_answers() {
    let table_a = seeded_table(50, 10);
    let table_b = seeded_table(50, 20);

    let (_, catalog_a) = cluster_with(&table_a, 3, &mut seeded_kmeans(1)).unwrap();
    let (_, catalog_b) = cluster_with(&table_b, 3, &mut seeded_kmeans(1)).unwrap();

    assert_eq!(catalog_a, catalog_b);
    assert_eq!(catalog_a, describe(3));
}

// ============================================================================
// Aggregation Tests
// ============================================================================

#[test]
fn test_pipeline_sizes_sum_to_hundred() {
    let table = generate(100);
    let (labeled, catalog) = cluster(&table, 4).unwrap();

    let summaries = summarize(&labeled, &catalog).unwrap();

    assert!(summaries.len() <= 4);
    assert_eq!(summaries.iter().map(|s| s.size).sum::<usize>(), 100);

    let indices: Vec<usize> = summaries.iter().map(|s| s.cluster_index).collect();
    let mut sorted = indices.clone();
    sorted.sort_unstable();
    assert_eq!(indices, sorted, "summaries should be ascending by index");

    for summary in &summaries {
        assert!(summary.size > 0);
        assert!(summary.top_cities.len() <= 5);
        assert!(summary.mean_answers.iter().all(|m| (1.0..=5.0).contains(m)));
        assert!(summary.top_cities.iter().map(|c| c.count).sum::<usize>() <= summary.size);
    }
}

#[test]
fn test_compare_matches_summaries() {
    let table = seeded_table(100, 8);
    let (labeled, catalog) = cluster_with(&table, 6, &mut seeded_kmeans(6)).unwrap();

    let summaries = summarize(&labeled, &catalog).unwrap();
    let rows = compare(&labeled, &catalog).unwrap();

    assert_eq!(rows.len(), summaries.len());
    for (row, summary) in rows.iter().zip(&summaries) {
        assert_eq!(row.cluster_index, summary.cluster_index);
        assert_eq!(row.name, summary.name);
        assert_eq!(row.size, summary.size);
        assert_eq!(row.mean_answers, summary.mean_answers);
    }
}

#[test]
fn test_requested_but_empty_cluster_absent() {
    let table = seeded_table(6, 2);
    let (labeled, catalog) =
        cluster_with(&table, 4, &mut Fixed(vec![3, 3, 0, 0, 3, 0])).unwrap();

    let summaries = summarize(&labeled, &catalog).unwrap();

    assert_eq!(
        summaries.iter().map(|s| s.cluster_index).collect::<Vec<_>>(),
        vec![0, 3]
    );
    assert!(summarize_cluster(&labeled, &catalog, 1).unwrap().is_none());
    assert_eq!(
        summarize_cluster(&labeled, &catalog, 4).unwrap_err(),
        ClusterCraftError::UnknownCluster(4)
    );
}

#[test]
fn test_summarize_with_foreign_catalog() {
    let table = seeded_table(30, 3);
    let mut round_robin = Fixed((0..30).map(|i| i % 5).collect());
    let (labeled, _) = cluster_with(&table, 5, &mut round_robin).unwrap();

    assert_eq!(
        summarize(&labeled, &describe(2)).unwrap_err(),
        ClusterCraftError::UnknownCluster(2)
    );
}

// ============================================================================
// Lookup Tests
// ============================================================================

#[test]
fn test_lookup_every_respondent() {
    let table = seeded_table(100, 12);
    let (labeled, catalog) = cluster_with(&table, 4, &mut seeded_kmeans(12)).unwrap();

    for respondent in &table {
        let profile = lookup(&labeled, &catalog, respondent.id).unwrap().unwrap();
        assert_eq!(&profile.record, respondent);
        assert_eq!(profile.answers(), &respondent.answers);
        assert_eq!(
            profile.cluster_name,
            catalog.get(profile.cluster_index).unwrap().name
        );
    }
}

#[test]
fn test_lookup_missing_id() {
    let table = generate(100);
    let (labeled, catalog) = cluster(&table, 4).unwrap();

    assert!(lookup(&labeled, &catalog, 999).unwrap().is_none());
}

// ============================================================================
// Session Tests
// ============================================================================

#[test]
fn test_session_end_to_end() {
    let config = SessionConfig::default().with_kmeans(KMeansConfig::default().with_seed(21));
    let mut session = AnalysisSession::new(config);

    assert_eq!(session.cluster(4).unwrap_err(), ClusterCraftError::EmptyInput);

    session.generate();
    assert_eq!(session.table().map(|t| t.len()), Some(100));

    let run = session.cluster(4).unwrap();
    assert_eq!(run.catalog.len(), 4);

    let report = session.report().unwrap();
    assert_eq!(report.iter().map(|s| s.size).sum::<usize>(), 100);
    assert!(session.profile(999).unwrap().is_none());

    let profile = session.profile(1).unwrap().unwrap();
    assert_eq!(profile.record.id, 1);
}

#[test]
fn test_session_custom_table_and_clusterer() {
    let mut session = AnalysisSession::default();
    session.set_table(seeded_table(4, 1));

    let run = session.cluster_with(2, &mut Fixed(vec![1, 0, 1, 0])).unwrap();
    assert_eq!(run.labeled.cluster_indices(), vec![0, 1]);

    let profile = session.profile(1).unwrap().unwrap();
    assert_eq!(profile.cluster_index, 1);
    assert_eq!(profile.cluster_name, "Analitycy");
}
