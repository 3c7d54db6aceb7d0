use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use implicit_interval_tree::{
    parse_queries, parse_records, Builder, ImplicitTree, IndexConfig, InterpolatedTree,
    IntervalIndex, ParseError, Record,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "iitree", about = "Interval overlap queries over an implicit interval tree")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Report every record overlapping each query interval.
    Query {
        /// Records to index (`beg end [label]` per line).
        intervals: PathBuf,
        /// Query intervals (`beg end` per line).
        queries: PathBuf,
        /// Interpolation model domains (0 = plain tree).
        #[arg(long, default_value_t = 0)]
        domains: usize,
    },
    /// Describe the built index and, optionally, compare query costs.
    Stats {
        /// Records to index (`beg end [label]` per line).
        intervals: PathBuf,
        /// Interpolation model domains.
        #[arg(long, default_value_t = 64)]
        domains: usize,
        /// Query intervals used to measure mean cost.
        #[arg(long)]
        queries: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Query {
            intervals,
            queries,
            domains,
        } => run_query(&intervals, &queries, domains)?,
        Commands::Stats {
            intervals,
            domains,
            queries,
        } => run_stats(&intervals, domains, queries.as_deref())?,
    }

    Ok(())
}

fn run_query(intervals_path: &Path, queries_path: &Path, domains: usize) -> Result<()> {
    let records = read_record_file(intervals_path)?;
    let queries = read_query_file(queries_path)?;

    let index: IntervalIndex<Record> = records
        .into_iter()
        .collect::<Builder<_>>()
        .build_with(&IndexConfig::from_domains(domains));
    info!(
        records = index.len(),
        interpolated = index.is_interpolated(),
        "index built"
    );

    let mut hits = Vec::new();
    for query in &queries {
        let cost = index.overlap_into(query.beg, query.end, &mut hits);
        hits.sort();
        println!(
            "query\t{}\t{}\thits={}\tcost={}",
            query.beg,
            query.end,
            hits.len(),
            cost
        );
        for hit in &hits {
            println!("\t{hit}");
        }
    }

    Ok(())
}

fn run_stats(intervals_path: &Path, domains: usize, queries_path: Option<&Path>) -> Result<()> {
    let records = read_record_file(intervals_path)?;
    let plain = ImplicitTree::from_items(records);
    let shape = *plain.shape();
    let index = InterpolatedTree::new(plain.clone(), domains);

    println!("records\t{}", shape.len());
    println!("root_level\t{}", shape.root_level().0);
    println!("full_size\t{}", shape.full_size());

    let summary = index.model_summary();
    println!("domains\t{}", summary.domains);
    println!("modelled_domains\t{}", summary.modelled);
    for (level, count) in &summary.levels {
        println!("model_level\t{level}\t{count}");
    }

    if let Some(path) = queries_path {
        let queries = read_query_file(path)?;
        if queries.is_empty() {
            println!("queries\t0");
            return Ok(());
        }

        let mut hits = Vec::new();
        let mut plain_cost = 0usize;
        let mut climb_cost = 0usize;
        for query in &queries {
            plain_cost += plain.overlap_into(query.beg, query.end, &mut hits);
            climb_cost += index.overlap_into(query.beg, query.end, &mut hits);
        }

        let n = queries.len() as f64;
        let stats = index.stats();
        println!("queries\t{}", queries.len());
        println!("mean_cost_plain\t{:.3}", plain_cost as f64 / n);
        println!("mean_cost_interpolated\t{:.3}", climb_cost as f64 / n);
        println!("mean_climb\t{:.3}", stats.mean_climb());
        println!("fallbacks\t{}", stats.fallbacks);
    }

    Ok(())
}

fn read_record_file(path: &Path) -> Result<Vec<Record>> {
    read_with(path, parse_records)
}

/// Reversed query intervals are accepted and answer nothing.
fn read_query_file(path: &Path) -> Result<Vec<Record>> {
    read_with(path, parse_queries)
}

fn read_with(
    path: &Path,
    parse: fn(BufReader<File>) -> std::result::Result<Vec<Record>, ParseError>,
) -> Result<Vec<Record>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    parse(BufReader::new(file))
        .with_context(|| format!("failed to parse records from {}", path.display()))
}
