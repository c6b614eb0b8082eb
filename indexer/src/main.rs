use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::{EnvFilter, fmt};
use vecspace_core::{build_index, Index, QueryConfig};
use vecspace_indexer::corpus::load_corpus;
use vecspace_indexer::{run_idf, run_query, run_weight};

#[derive(Parser)]
#[command(name = "vecspace")]
#[command(about = "Index a text corpus and find the best TF-IDF cosine match", long_about = None)]
struct Cli {
    /// Corpus path (directory or file)
    #[arg(long, global = true, default_value = "./presidential_debates")]
    corpus: String,
    /// Postings per term consulted by the bounded query
    #[arg(long, global = true, default_value_t = 10)]
    top_k: usize,
    /// Print JSON lines instead of text
    #[arg(long, global = true, default_value_t = false)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer each query with the single best document
    Query {
        #[arg(required = true)]
        queries: Vec<String>,
        /// Run a full scan when the bounded search cannot certify its answer
        #[arg(long, default_value_t = false)]
        fallback: bool,
    },
    /// Inverse document frequency of stemmed terms (-1 when unseen)
    Idf {
        #[arg(required = true)]
        terms: Vec<String>,
    },
    /// Normalized weight of stemmed terms in one document
    Weight {
        #[arg(long)]
        doc: String,
        #[arg(required = true)]
        terms: Vec<String>,
    },
    /// Corpus and index sizes
    Stats,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    let config = QueryConfig::new(cli.top_k)?;
    let index = build_index(load_corpus(&cli.corpus)?).with_config(config)?;

    match cli.command {
        Commands::Query { queries, fallback } => {
            for q in &queries {
                let report = run_query(&index, q, fallback);
                emit(cli.json, &report, || report.to_text())?;
            }
        }
        Commands::Idf { terms } => {
            for t in &terms {
                let report = run_idf(&index, t);
                emit(cli.json, &report, || format!("{:.12}", report.idf))?;
            }
        }
        Commands::Weight { doc, terms } => {
            for t in &terms {
                let report = run_weight(&index, &doc, t)?;
                emit(cli.json, &report, || format!("{:.12}", report.weight))?;
            }
        }
        Commands::Stats => print_stats(&index, cli.json)?,
    }
    Ok(())
}

fn print_stats(index: &Index, json: bool) -> Result<()> {
    let stats = index.stats();
    emit(json, &stats, || {
        format!("{} documents, {} terms, {} postings", stats.num_docs, stats.num_terms, stats.num_postings)
    })
}

fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}
