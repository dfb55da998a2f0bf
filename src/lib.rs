#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Parse-or-fallback cell coercions and caret-marker helpers.
pub mod coerce;
/// Centralized constants used across cleaning, labeling, and expansion.
pub mod constants;
/// Embedding collaborator trait and deterministic stub.
pub mod embed;
/// Row validation and normalization engine.
pub mod engine;
/// Reusable CLI runner backing the `prepare` binary.
pub mod example_apps;
/// Text-to-feature expansion over cleaned tables.
pub mod expand;
mod hash;
/// CSV ingestion and parquet artifact serialization.
pub mod io;
/// Column-group schema configuration.
pub mod schema;
/// Raw and typed table models.
pub mod table;
/// Shared type aliases.
pub mod types;

mod errors;

pub use embed::{Embedder, HashingEmbedder};
pub use engine::{clean, CleanCounters, CleanOutcome};
pub use errors::PrepError;
pub use expand::expand;
pub use io::{read_csv, read_csv_path, write_parquet};
pub use schema::{ColumnGroup, ColumnSchema};
pub use table::{Cell, ColumnKind, RawTable, Table};
pub use types::{ColumnName, EmbeddingColumnName, Gtin, RawCellValue};
