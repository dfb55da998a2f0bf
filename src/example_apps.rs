//! Reusable pipeline runner backing the `prepare` binary.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::constants::embedding::DEFAULT_EMBEDDING_DIM;
use crate::embed::HashingEmbedder;
use crate::engine::clean;
use crate::expand::expand;
use crate::io::{read_csv_path, write_parquet};
use crate::schema::ColumnSchema;

#[derive(Debug, Parser)]
#[command(
    name = "prepare",
    disable_help_subcommand = true,
    about = "Clean a raw product-nutrition CSV into a training-ready parquet artifact",
    long_about = "Clean a raw product-nutrition CSV (projection, anomaly labeling, coercion, \
row filtering, GTIN deduplication), expand text columns into embedding features, and write \
the result as parquet."
)]
/// CLI for `prepare`.
///
/// Common usage:
/// - Full pipeline: `prepare --input merged.csv --output merged_embedded.parquet`
/// - Clean only: `prepare --input merged.csv --output cleaned.parquet --skip-embedding`
/// - Alternate schema: `--schema columns.json`
pub struct PrepareCli {
    #[arg(long, value_name = "PATH", help = "Raw CSV input file")]
    input: PathBuf,
    #[arg(long, value_name = "PATH", help = "Parquet output path")]
    output: PathBuf,
    #[arg(
        long = "schema",
        value_name = "PATH",
        help = "Optional JSON column-schema override"
    )]
    schema_path: Option<PathBuf>,
    #[arg(
        long = "embedding-dim",
        default_value_t = DEFAULT_EMBEDDING_DIM,
        help = "Feature width of the deterministic stub embedder"
    )]
    embedding_dim: usize,
    #[arg(long, help = "Suppress the per-stage removal report")]
    quiet: bool,
    #[arg(
        long = "skip-embedding",
        help = "Write the cleaned table without text expansion"
    )]
    skip_embedding: bool,
}

/// Parse CLI arguments and run the full prepare pipeline.
pub fn run_prepare() -> Result<(), Box<dyn Error>> {
    let cli = PrepareCli::parse();
    init_tracing();

    let schema = match &cli.schema_path {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => ColumnSchema::product_nutrition(),
    };

    info!(input = %cli.input.display(), "loading raw table");
    let raw = read_csv_path(&cli.input)?;

    let outcome = clean(raw, &schema)?;
    if !cli.quiet {
        outcome.counters.log();
    }

    let table = if cli.skip_embedding {
        outcome.table
    } else {
        let embedder = HashingEmbedder::new(cli.embedding_dim);
        expand(outcome.table, &embedder, &schema)?
    };

    write_parquet(&table, &cli.output)?;
    Ok(())
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
