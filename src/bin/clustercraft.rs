//! Command-line front end: generate respondents, cluster them and print the
//! cluster report and individual profiles.
//!
//! Usage: `clustercraft [--respondents N] [--clusters K] [--seed S] [--profile ID]... [--json] [-v]`

use clap::builder::TypedValueParser;
use clap::Parser;
use clustercraft::{
    AnalysisSession, ClusterCraftError, ClusterSummary, ComparisonRow, KMeansConfig, Profile,
    RespondentId, SessionConfig, DEFAULT_CLUSTERS, DEFAULT_RESPONDENTS, MAX_CLUSTERS,
    MIN_CLUSTERS, PREVIEW_ROWS, PROFILE_NOTE,
};
use log::LevelFilter;
use serde::Serialize;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "clustercraft", version, about = "Segment synthetic survey respondents")]
struct Cli {
    /// Number of respondents to generate
    #[arg(short = 'n', long, default_value_t = DEFAULT_RESPONDENTS)]
    respondents: usize,

    /// Number of clusters
    #[arg(
        short = 'k',
        long,
        default_value_t = DEFAULT_CLUSTERS,
        value_parser = clap::value_parser!(u8).range(MIN_CLUSTERS as i64..=MAX_CLUSTERS as i64)
            .map(usize::from)
    )]
    clusters: usize,

    /// Seed for k-means; omit for a fresh partition on every run
    #[arg(long)]
    seed: Option<u64>,

    /// Respondent ids whose profiles should be printed
    #[arg(short, long = "profile")]
    profiles: Vec<RespondentId>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log k-means progress
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    k: usize,
    clusters: &'a [ClusterSummary],
    comparison: &'a [ComparisonRow],
    profiles: Vec<JsonProfile>,
}

#[derive(Serialize)]
struct JsonProfile {
    id: RespondentId,
    profile: Option<Profile>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut kmeans = KMeansConfig::default();
    if let Some(seed) = cli.seed {
        kmeans = kmeans.with_seed(seed);
    }
    let config = SessionConfig::default()
        .with_respondents(cli.respondents)
        .with_clusters(cli.clusters)
        .with_kmeans(kmeans);

    let mut session = AnalysisSession::new(config);
    session.generate();
    let k = session.cluster_default()?.k;

    let report = session.report()?;
    let comparison = session.comparison()?;
    let profiles = cli
        .profiles
        .iter()
        .map(|&id| Ok((id, session.profile(id)?)))
        .collect::<Result<Vec<_>, ClusterCraftError>>()?;

    if cli.json {
        let json = JsonReport {
            k,
            clusters: &report,
            comparison: &comparison,
            profiles: profiles
                .into_iter()
                .map(|(id, profile)| JsonProfile { id, profile })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    print_previews(&session);
    print_report(&report);
    print_comparison(&comparison);
    for (id, profile) in &profiles {
        print_profile(*id, profile.as_ref());
    }

    Ok(())
}

fn print_previews(session: &AnalysisSession) {
    if let Some(table) = session.table() {
        println!("=== Generated {} respondents ===\n", table.len());
        println!("{:>4}  {:<22} answers", "id", "city");
        for respondent in table.head(PREVIEW_ROWS) {
            println!(
                "{:>4}  {:<22} {:?}",
                respondent.id, respondent.city, respondent.answers
            );
        }
        println!();
    }

    if let Some(run) = session.run() {
        println!("=== Clustering into {} groups ===\n", run.k);
        println!("{:>4}  {:<22} {:<17} cluster", "id", "city", "answers");
        for row in run.labeled.head(PREVIEW_ROWS) {
            println!(
                "{:>4}  {:<22} {:<17} {}",
                row.respondent.id,
                row.respondent.city,
                format!("{:?}", row.respondent.answers),
                row.cluster
            );
        }
        println!();
    }
}

fn print_report(report: &[ClusterSummary]) {
    println!("=== Cluster report ===\n");
    for summary in report {
        println!("Cluster {} - {}", summary.cluster_index, summary.name);
        println!("{}", summary.description);
        println!("  Size: {}", summary.size);
        println!("  Top cities:");
        for city in &summary.top_cities {
            println!("    {:<22} {}", city.city, city.count);
        }
        println!("  Mean answers: {}", format_means(&summary.mean_answers));
        println!();
    }
}

fn print_comparison(rows: &[ComparisonRow]) {
    println!("=== Cluster comparison ===\n");
    println!(
        "{:>7}  {:<20} {:>5}  {:>5} {:>5} {:>5} {:>5} {:>5}",
        "cluster", "name", "size", "q1", "q2", "q3", "q4", "q5"
    );
    for row in rows {
        println!(
            "{:>7}  {:<20} {:>5}  {}",
            row.cluster_index,
            row.name,
            row.size,
            format_means(&row.mean_answers)
        );
    }
    println!();
}

fn print_profile(id: RespondentId, profile: Option<&Profile>) {
    println!("{}", format_profile(id, profile));
}

fn format_profile(id: RespondentId, profile: Option<&Profile>) -> String {
    let mut out = format!("=== Respondent {} ===\n", id);
    match profile {
        None => out.push_str("Respondent not found.\n"),
        Some(profile) => {
            out.push_str(&format!("City: {}\n", profile.record.city));
            out.push_str(&format!(
                "Cluster: {} ({})\n",
                profile.cluster_name, profile.cluster_index
            ));
            out.push_str(&format!("Answers: {:?}\n", profile.answers()));
            out.push_str(&format!("{}\n", profile.description));
            out.push_str(&format!("{}\n", PROFILE_NOTE));
        }
    }
    out
}

fn format_means(means: &[f64]) -> String {
    means
        .iter()
        .map(|m| format!("{:>5.2}", m))
        .collect::<Vec<_>>()
        .join(" ")
}
