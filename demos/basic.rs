//! Basic walk through the data layer: generate, cluster, report, look up
//!
//! Run with: cargo run --example basic --release

use clustercraft::{cluster_with, compare, generate, lookup, summarize, KMeans, KMeansConfig};

fn main() {
    println!("=== clustercraft example ===\n");

    let n_respondents = 100;
    let n_clusters = 4;

    println!("Generating {} respondents...", n_respondents);
    let table = generate(n_respondents);

    println!("First 5 respondents:");
    for respondent in table.head(5) {
        println!(
            "  #{:<3} {:<20} {:?}",
            respondent.id, respondent.city, respondent.answers
        );
    }
    println!();

    println!("Running k-means with k={}...\n", n_clusters);
    let mut kmeans = KMeans::with_config(KMeansConfig::default().with_seed(42));
    let (labeled, catalog) =
        cluster_with(&table, n_clusters, &mut kmeans).expect("Clustering failed");

    if let Some(inertia) = kmeans.inertia() {
        println!("Inertia: {:.2}\n", inertia);
    }

    let summaries = summarize(&labeled, &catalog).expect("Summary failed");
    println!("Cluster distribution:");
    for summary in &summaries {
        println!(
            "  Cluster {} ({}): {} respondents ({:.1}%)",
            summary.cluster_index,
            summary.name,
            summary.size,
            (summary.size as f64 / n_respondents as f64) * 100.0
        );
    }
    println!();

    println!("Mean answers per cluster:");
    for row in compare(&labeled, &catalog).expect("Comparison failed") {
        println!("  {:<20} {:?}", row.name, row.mean_answers);
    }
    println!();

    for id in [1, 50, 999] {
        match lookup(&labeled, &catalog, id).expect("Lookup failed") {
            Some(profile) => println!(
                "Respondent {} from {} -> {}",
                id, profile.record.city, profile.cluster_name
            ),
            None => println!("Respondent {} not found", id),
        }
    }

    println!("\n=== Done! ===");
}
