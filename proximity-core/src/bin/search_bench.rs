//! User Search Benchmarking Tool
//!
//! Seeds the engine from a JSON storage snapshot, then runs each query as a
//! given searcher and prints the ranked hits with timings. Useful both as a
//! smoke test for a fresh export and to get realistic latency numbers.
//!
//! ## Usage
//!
//! ```bash
//! # Search as user 42 (city and country are looked up in the snapshot)
//! ./target/release/search_bench users.json --searcher 42 ali bob "Alice S"
//!
//! # Case-insensitive prefixes, total order, 1000 timed runs per query
//! ./target/release/search_bench users.json --searcher 42 --deterministic --runs 1000 ali
//! ```
//!
//! Set `RUST_LOG=proximity_core=debug` to see which field answered each query.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use proximity_core::{SearchEngine, Snapshot};
use proximity_types::{SearchConfig, Searcher, UserId};
use tracing::info;
use tracing_subscriber::EnvFilter;

const WARMUP_RUNS: usize = 1;
const MAX_PRINTED: usize = 20;

#[derive(Parser, Debug)]
#[command(version, about = "Seed the user search engine from a snapshot and time queries")]
struct Cli {
    /// JSON snapshot: {"users": [...]}
    snapshot: PathBuf,

    /// Queries to run
    #[arg(value_name = "QUERY", required = true)]
    queries: Vec<String>,

    /// Id of the searching user
    #[arg(short, long)]
    searcher: UserId,

    /// Case-insensitive prefixes and ties ordered by user id
    #[arg(long)]
    deterministic: bool,

    /// Timed runs per query
    #[arg(short, long, default_value_t = 5)]
    runs: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let snapshot = Snapshot::from_path(&cli.snapshot)
        .with_context(|| format!("loading {}", cli.snapshot.display()))?;
    let config = if cli.deterministic {
        SearchConfig::deterministic()
    } else {
        SearchConfig::source_compatible()
    };

    let started = Instant::now();
    let engine = snapshot.build_engine(config);
    let seed_time = started.elapsed();
    info!(users = engine.len(), "engine ready");

    let searcher = resolve_searcher(&engine, cli.searcher);

    println!("=== Seed ===");
    println!("Users       : {}", engine.len());
    println!("Elapsed     : {:.3} ms", ms(seed_time));
    println!("Stats       : {}", engine.stats());

    for query in &cli.queries {
        run_query(&engine, query, &searcher, cli.runs.max(1));
    }

    println!("=== Totals ===");
    println!("Queries     : {}", engine.metrics().queries_executed);
    Ok(())
}

/// Unknown searchers still search, with no city, country or friends.
fn resolve_searcher(engine: &SearchEngine, id: UserId) -> Searcher {
    match engine.user(id) {
        Some(user) => Searcher::new(id, user.city.clone(), user.country.clone()),
        None => {
            eprintln!("warning: searcher {id} not in snapshot, ranking by name only");
            Searcher::new(id, "", "")
        }
    }
}

fn run_query(engine: &SearchEngine, query: &str, searcher: &Searcher, runs: usize) {
    for _ in 0..WARMUP_RUNS {
        std::hint::black_box(engine.search_users(query, searcher));
    }

    let mut best = Duration::MAX;
    let mut total = Duration::ZERO;
    let mut results = Vec::new();
    for _ in 0..runs {
        let t0 = Instant::now();
        results = engine.search_users(query, searcher);
        let dt = t0.elapsed();
        best = best.min(dt);
        total += dt;
    }

    println!("=== {query:?} ===");
    println!("Hits        : {}", results.len());
    println!("Best        : {:.3} ms", ms(best));
    println!("Mean        : {:.3} ms", ms(total) / runs as f64);
    for hit in results.iter().take(MAX_PRINTED) {
        let name = engine
            .user(hit.user_id)
            .map(|u| format!("{} ({})", u.username, u.full_name()))
            .unwrap_or_default();
        println!("  {hit}  {name}");
    }
    if results.len() > MAX_PRINTED {
        println!("  ... {} more", results.len() - MAX_PRINTED);
    }
}

fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1e3
}
